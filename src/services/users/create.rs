use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::UserService;
use crate::models::{
    ApiResponse, ErrorCode,
    users::{entities::UserRole, requests::CreateUserRequest, responses::UserResponse},
};
use crate::services::access::{
    bad_request, conflict, current_user, ensure_record_access, forbidden, internal_error, not_found,
    required_college_id, write_error,
};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password_simple, validate_username};

pub async fn create_user(
    service: &UserService,
    mut user_data: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = respond_on_err!(current_user(request));

    if !actor.role.can_manage(&user_data.role) {
        return Ok(forbidden(format!(
            "Role {} cannot create {} accounts",
            actor.role, user_data.role
        )));
    }

    user_data.username = user_data.username.trim().to_string();
    user_data.email = user_data.email.trim().to_lowercase();

    // 验证用户名
    if let Err(msg) = validate_username(&user_data.username) {
        return Ok(bad_request(ErrorCode::UserNameInvalid, msg));
    }

    // 验证邮箱
    if let Err(msg) = validate_email(&user_data.email) {
        return Ok(bad_request(ErrorCode::UserEmailInvalid, msg));
    }

    if let Err(msg) = validate_password_simple(&user_data.password) {
        return Ok(bad_request(ErrorCode::PasswordPolicyViolation, msg));
    }

    let storage = service.get_storage(request);

    // 归属学院：系统管理员创建学院管理员时需指定
    let college_id = respond_on_err!(required_college_id(&actor, user_data.college_id));
    match storage.get_college_by_id(college_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::CollegeNotFound, "College not found")),
        Err(e) => return Ok(internal_error("Failed to get college", e)),
    }
    user_data.college_id = Some(college_id);

    // 归属院系
    if user_data.role.requires_department() {
        let Some(department_id) = user_data.department_id else {
            return Ok(bad_request(
                ErrorCode::BadRequest,
                format!("department_id is required for role {}", user_data.role),
            ));
        };
        match storage.get_department_by_id(department_id).await {
            Ok(Some(department)) if department.college_id == college_id => {}
            Ok(_) => {
                return Ok(not_found(
                    ErrorCode::DepartmentNotFound,
                    "Department not found in this college",
                ));
            }
            Err(e) => return Ok(internal_error("Failed to get department", e)),
        }
        respond_on_err!(ensure_record_access(&actor, college_id, Some(department_id)));
    } else if user_data.role == UserRole::CollegeAdmin {
        user_data.department_id = None;
    }

    // 唯一性检查
    match storage.get_user_by_username(&user_data.username).await {
        Ok(Some(_)) => {
            return Ok(conflict(
                ErrorCode::UserNameAlreadyExists,
                "Username already exists",
            ));
        }
        Ok(None) => {}
        Err(e) => return Ok(internal_error("Failed to check username", e)),
    }
    match storage.get_user_by_email(&user_data.email).await {
        Ok(Some(_)) => {
            return Ok(conflict(
                ErrorCode::UserEmailAlreadyExists,
                "Email already exists",
            ));
        }
        Ok(None) => {}
        Err(e) => return Ok(internal_error("Failed to check email", e)),
    }

    user_data.password = match hash_password(&user_data.password) {
        Ok(hash) => hash,
        Err(e) => return Ok(internal_error("Password hashing failed", e)),
    };

    match storage.create_user(user_data).await {
        Ok(user) => {
            info!(
                "User {} ({}) created by {}",
                user.username, user.role, actor.username
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                UserResponse { user },
                "User created successfully",
            )))
        }
        Err(e) => Ok(write_error("User creation failed", e, ErrorCode::Conflict)),
    }
}
