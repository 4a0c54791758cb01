use serde::Serialize;

use crate::models::users::entities::UserRole;

/// 仪表盘统计，按角色填充不同字段
#[derive(Debug, Default, Serialize)]
pub struct DashboardStats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colleges: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departments: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teachers: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub students: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batches: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_balancing_pdfs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cgpa: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_payments: Option<u64>,
    pub unread_notifications: i64,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub role: UserRole,
    pub college_id: Option<i64>,
    pub department_id: Option<i64>,
    pub stats: DashboardStats,
}
