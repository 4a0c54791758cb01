use serde::Serialize;

use super::entities::Notification;
use crate::models::common::PaginatedResponse;

/// 通知列表响应
pub type NotificationListResponse = PaginatedResponse<Notification>;

/// 未读通知数量响应
#[derive(Debug, Serialize)]
pub struct UnreadCountResponse {
    pub unread_count: i64,
}

/// 标记全部已读响应
#[derive(Debug, Serialize)]
pub struct MarkAllReadResponse {
    pub marked_count: i64,
}

/// 广播结果
#[derive(Debug, Serialize)]
pub struct BroadcastResponse {
    pub recipients: i64,
}
