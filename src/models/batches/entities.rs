use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Batch {
    pub id: i64,
    pub college_id: i64,
    pub department_id: i64,
    // 届别名称，如 "2021-2025"
    pub name: String,
    pub start_year: i32,
    pub end_year: i32,
    pub graduated: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
