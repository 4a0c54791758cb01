use crate::models::common::{PaginationQuery, pagination::deserialize_optional_bool};
use crate::models::users::entities::UserRole;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct NotificationQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub unread_only: Option<bool>,
}

/// 广播通知请求
///
/// 接收人 = 发送者所在学院内（系统管理员可指定学院）满足角色和院系筛选条件的活跃用户。
#[derive(Debug, Deserialize)]
pub struct BroadcastNotificationRequest {
    pub title: String,
    pub content: String,
    pub college_id: Option<i64>,
    pub target_role: Option<UserRole>,
    pub department_id: Option<i64>,
}

/// 存储层创建通知
#[derive(Debug, Clone)]
pub struct CreateNotificationRequest {
    pub user_id: i64,
    pub sender_id: Option<i64>,
    pub college_id: Option<i64>,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Default)]
pub struct NotificationListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub unread_only: Option<bool>,
}
