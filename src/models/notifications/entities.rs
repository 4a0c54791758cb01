use serde::{Deserialize, Serialize};

/// 通知（每个接收人一条记录）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub sender_id: Option<i64>,
    pub college_id: Option<i64>,
    pub title: String,
    pub content: String,
    pub is_read: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
