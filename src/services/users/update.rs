use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::UserService;
use crate::models::{
    ApiResponse, ErrorCode,
    users::{requests::UpdateUserRequest, responses::UserResponse},
};
use crate::services::access::{
    bad_request, conflict, current_user, ensure_record_access, internal_error,
    invalidate_user_cache, not_found, write_error,
};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password_simple};

pub async fn update_user(
    service: &UserService,
    user_id: i64,
    mut update_data: UpdateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = respond_on_err!(current_user(request));
    let target = respond_on_err!(service.load_manageable(request, &actor, user_id).await);
    let storage = service.get_storage(request);

    if let Some(email) = update_data.email.as_mut() {
        *email = email.trim().to_lowercase();
        if let Err(msg) = validate_email(email) {
            return Ok(bad_request(ErrorCode::UserEmailInvalid, msg));
        }
        match storage.get_user_by_email(email).await {
            Ok(Some(existing)) if existing.id != user_id => {
                return Ok(conflict(
                    ErrorCode::UserEmailAlreadyExists,
                    "Email already exists",
                ));
            }
            Ok(_) => {}
            Err(e) => return Ok(internal_error("Failed to check email", e)),
        }
    }

    if let Some(department_id) = update_data.department_id {
        if !target.role.requires_department() {
            return Ok(bad_request(
                ErrorCode::BadRequest,
                format!("Role {} is not bound to a department", target.role),
            ));
        }
        match storage.get_department_by_id(department_id).await {
            Ok(Some(department)) if Some(department.college_id) == target.college_id => {}
            Ok(_) => {
                return Ok(not_found(
                    ErrorCode::DepartmentNotFound,
                    "Department not found in this college",
                ));
            }
            Err(e) => return Ok(internal_error("Failed to get department", e)),
        }
        if let Some(college_id) = target.college_id {
            respond_on_err!(ensure_record_access(&actor, college_id, Some(department_id)));
        }
    }

    // 管理员重置密码同样需要满足密码策略
    if let Some(password) = update_data.password.take() {
        if let Err(msg) = validate_password_simple(&password) {
            return Ok(bad_request(ErrorCode::PasswordPolicyViolation, msg));
        }
        update_data.password = match hash_password(&password) {
            Ok(hash) => Some(hash),
            Err(e) => return Ok(internal_error("Password hashing failed", e)),
        };
    }

    match storage.update_user(user_id, update_data).await {
        Ok(Some(user)) => {
            invalidate_user_cache(request, user_id).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                UserResponse { user },
                "User updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::UserNotFound, "User not found")),
        Err(e) if e.is_conflict() => Ok(write_error(
            "User update failed",
            e,
            ErrorCode::UserEmailAlreadyExists,
        )),
        Err(e) => {
            error!("User update failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::UserUpdateFailed,
                    "User update failed",
                )),
            )
        }
    }
}
