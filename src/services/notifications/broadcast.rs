use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::NotificationService;
use crate::models::notifications::requests::{
    BroadcastNotificationRequest, CreateNotificationRequest,
};
use crate::models::notifications::responses::BroadcastResponse;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{
    bad_request, current_user, forbidden, internal_error, required_college_id,
    scoped_department_id,
};

pub async fn broadcast(
    service: &NotificationService,
    request: &HttpRequest,
    broadcast: BroadcastNotificationRequest,
) -> ActixResult<HttpResponse> {
    let user = respond_on_err!(current_user(request));

    let title = broadcast.title.trim().to_string();
    let content = broadcast.content.trim().to_string();
    if title.is_empty() || content.is_empty() {
        return Ok(bad_request(
            ErrorCode::BadRequest,
            "Notification title and content are required",
        ));
    }

    let college_id = respond_on_err!(required_college_id(&user, broadcast.college_id));
    // 系主任、教师只能发给本院系
    let department_id = respond_on_err!(scoped_department_id(&user, broadcast.department_id));

    // 教师只能通知学生
    let target_role = match (user.role, broadcast.target_role) {
        (UserRole::Teacher, None | Some(UserRole::Student)) => Some(UserRole::Student),
        (UserRole::Teacher, Some(_)) => {
            return Ok(forbidden("Teachers can only notify students"));
        }
        (_, role) => role,
    };

    let storage = service.get_storage(request);

    let recipients = match storage
        .list_active_user_ids(college_id, target_role, department_id)
        .await
    {
        Ok(ids) => ids,
        Err(e) => return Ok(internal_error("Failed to resolve recipients", e)),
    };

    let notifications: Vec<CreateNotificationRequest> = recipients
        .into_iter()
        .filter(|id| *id != user.id)
        .map(|user_id| CreateNotificationRequest {
            user_id,
            sender_id: Some(user.id),
            college_id: Some(college_id),
            title: title.clone(),
            content: content.clone(),
        })
        .collect();

    if notifications.is_empty() {
        return Ok(bad_request(
            ErrorCode::NotificationNoRecipients,
            "No recipients match the given filters",
        ));
    }

    match storage.create_notifications(notifications).await {
        Ok(count) => {
            info!(
                "User {} broadcast '{}' to {} recipients in college {}",
                user.id, title, count, college_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                BroadcastResponse {
                    recipients: count as i64,
                },
                "Notification sent successfully",
            )))
        }
        Err(e) => Ok(internal_error("Failed to create notifications", e)),
    }
}
