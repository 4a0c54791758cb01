use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, warn};

use super::UserService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{
    bad_request, current_user, invalidate_user_cache, not_found,
};

pub async fn delete_user(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = respond_on_err!(current_user(request));

    // 禁止删除当前用户
    if actor.id == user_id {
        return Ok(bad_request(
            ErrorCode::CanNotDeleteCurrentUser,
            "Cannot delete current user",
        ));
    }

    let target = respond_on_err!(service.load_manageable(request, &actor, user_id).await);

    match service.get_storage(request).delete_user(user_id).await {
        Ok(true) => {
            invalidate_user_cache(request, user_id).await;
            warn!("User {} deleted by {}", target.username, actor.username);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("User deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::UserNotFound, "User not found")),
        Err(e) => {
            error!("User deletion failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::UserDeleteFailed,
                    "User deletion failed",
                )),
            )
        }
    }
}
