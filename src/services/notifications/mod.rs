pub mod broadcast;
pub mod count;
pub mod delete;
pub mod list;
pub mod read;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::ErrorCode;
use crate::models::notifications::entities::Notification;
use crate::models::notifications::requests::{
    BroadcastNotificationRequest, NotificationQueryParams,
};
use crate::services::access::{Access, forbidden, internal_error, not_found};
use crate::storage::Storage;

pub struct NotificationService {
    storage: Option<Arc<dyn Storage>>,
}

impl NotificationService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    /// 只能操作发给自己的通知
    pub(crate) async fn load_own(
        &self,
        request: &HttpRequest,
        user_id: i64,
        notification_id: i64,
    ) -> Access<Notification> {
        match self
            .get_storage(request)
            .get_notification_by_id(notification_id)
            .await
        {
            Ok(Some(notification)) if notification.user_id == user_id => Ok(notification),
            Ok(Some(_)) => Err(forbidden("Notification belongs to another user")),
            Ok(None) => Err(not_found(
                ErrorCode::NotificationNotFound,
                "Notification not found",
            )),
            Err(e) => Err(internal_error("Failed to get notification", e)),
        }
    }

    pub async fn list_notifications(
        &self,
        request: &HttpRequest,
        query: NotificationQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_notifications(self, request, query).await
    }

    pub async fn get_unread_count(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        count::get_unread_count(self, request).await
    }

    // 按角色、院系向学院内用户广播
    pub async fn broadcast(
        &self,
        request: &HttpRequest,
        broadcast: BroadcastNotificationRequest,
    ) -> ActixResult<HttpResponse> {
        broadcast::broadcast(self, request, broadcast).await
    }

    pub async fn mark_as_read(
        &self,
        request: &HttpRequest,
        notification_id: i64,
    ) -> ActixResult<HttpResponse> {
        read::mark_as_read(self, request, notification_id).await
    }

    pub async fn mark_all_as_read(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        read::mark_all_as_read(self, request).await
    }

    pub async fn delete_notification(
        &self,
        request: &HttpRequest,
        notification_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_notification(self, request, notification_id).await
    }
}
