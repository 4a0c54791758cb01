use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::models::auth::ChangePasswordRequest;
use crate::models::users::requests::UpdateUserRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{bad_request, current_user, internal_error, invalidate_user_cache};
use crate::utils::password::{hash_password, verify_password};
use crate::utils::validate::validate_password_simple;

use super::AuthService;

pub async fn handle_change_password(
    service: &AuthService,
    change_request: ChangePasswordRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = respond_on_err!(current_user(request));
    let storage = service.get_storage(request);

    // 认证缓存里没有密码哈希，需要从存储读取
    let stored = match storage.get_user_by_id(user.id).await {
        Ok(Some(stored)) => stored,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "User not found",
            )));
        }
        Err(e) => return Ok(internal_error("Failed to load user", e)),
    };

    if !verify_password(&change_request.current_password, &stored.password_hash) {
        return Ok(bad_request(
            ErrorCode::AuthFailed,
            "Current password is incorrect",
        ));
    }

    if let Err(msg) = validate_password_simple(&change_request.new_password) {
        return Ok(bad_request(ErrorCode::PasswordPolicyViolation, msg));
    }

    let password_hash = match hash_password(&change_request.new_password) {
        Ok(hash) => hash,
        Err(e) => return Ok(internal_error("Password hashing failed", e)),
    };

    let update = UpdateUserRequest {
        email: None,
        password: Some(password_hash),
        status: None,
        display_name: None,
        department_id: None,
    };

    match storage.update_user(user.id, update).await {
        Ok(Some(_)) => {
            invalidate_user_cache(request, user.id).await;
            info!("User {} changed password", user.username);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Password changed successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) => Ok(internal_error("Failed to change password", e)),
    }
}
