//! 服务层公用的鉴权与租户范围判断
//!
//! 角色是否允许访问某组路由由 `RequireRole` 负责；这里处理“能访问哪个学院、哪个院系”。
//! 所有函数在拒绝时直接给出可返回的 `HttpResponse`。

use actix_web::{HttpRequest, HttpResponse};
use std::sync::Arc;
use tracing::{error, warn};

use crate::cache::{ObjectCache, user_cache_key};
use crate::errors::CollegeAdminError;
use crate::middlewares::RequireJWT;
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};

pub type Access<T> = Result<T, HttpResponse>;

/// 当前登录用户
pub fn current_user(request: &HttpRequest) -> Access<User> {
    RequireJWT::extract_user_claims(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        ))
    })
}

pub fn forbidden(message: impl Into<String>) -> HttpResponse {
    HttpResponse::Forbidden().json(ApiResponse::error_empty(ErrorCode::Forbidden, message))
}

pub fn bad_request(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

pub fn not_found(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(code, message))
}

pub fn conflict(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(code, message))
}

/// 记录错误日志并返回 500，错误详情只写日志
pub fn internal_error(context: &str, err: impl std::fmt::Display) -> HttpResponse {
    error!("{}: {}", context, err);
    HttpResponse::InternalServerError()
        .json(ApiResponse::error_empty(ErrorCode::InternalServerError, context))
}

/// 写入失败：唯一约束冲突返回 409，其余同 `internal_error`
pub fn write_error(
    context: &str,
    err: CollegeAdminError,
    conflict_code: ErrorCode,
) -> HttpResponse {
    if err.is_conflict() {
        warn!("{}: {}", context, err);
        return conflict(conflict_code, "Resource already exists");
    }
    internal_error(context, err)
}

/// 查询时的学院范围
///
/// 系统管理员：使用请求中的 college_id，None 表示全部学院；
/// 其他角色：固定为本学院，指定其他学院时拒绝。
pub fn scoped_college_id(user: &User, requested: Option<i64>) -> Access<Option<i64>> {
    if user.role == UserRole::SystemAdmin {
        return Ok(requested);
    }
    let own = user
        .college_id
        .ok_or_else(|| forbidden("Current user is not bound to a college"))?;
    match requested {
        Some(id) if id != own => Err(forbidden("Access to another college is not allowed")),
        _ => Ok(Some(own)),
    }
}

/// 写操作需要确定的学院：系统管理员必须显式指定
pub fn required_college_id(user: &User, requested: Option<i64>) -> Access<i64> {
    scoped_college_id(user, requested)?.ok_or_else(|| {
        bad_request(ErrorCode::BadRequest, "college_id is required for this operation")
    })
}

/// 查询时的院系范围：系主任、教师只能看本院系
pub fn scoped_department_id(user: &User, requested: Option<i64>) -> Access<Option<i64>> {
    if !user.role.is_department_scoped() {
        return Ok(requested);
    }
    let own = user
        .department_id
        .ok_or_else(|| forbidden("Current user is not bound to a department"))?;
    match requested {
        Some(id) if id != own => Err(forbidden("Access to another department is not allowed")),
        _ => Ok(Some(own)),
    }
}

/// 记录归属检查：学院必须在范围内，院系限定角色还要求同一院系
pub fn ensure_record_access(user: &User, college_id: i64, department_id: Option<i64>) -> Access<()> {
    if user.role == UserRole::SystemAdmin {
        return Ok(());
    }
    if user.college_id != Some(college_id) {
        return Err(forbidden("Access to another college is not allowed"));
    }
    if user.role.is_department_scoped()
        && let Some(department_id) = department_id
        && user.department_id != Some(department_id)
    {
        return Err(forbidden("Access to another department is not allowed"));
    }
    Ok(())
}

/// 对象缓存（未配置时为 None）
pub fn get_cache(request: &HttpRequest) -> Option<Arc<dyn ObjectCache>> {
    request
        .app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>()
        .map(|data| data.get_ref().clone())
}

/// 用户资料变更后清除认证缓存
pub async fn invalidate_user_cache(request: &HttpRequest, user_id: i64) {
    if let Some(cache) = get_cache(request) {
        cache.remove(&user_cache_key(user_id)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserStatus;

    fn user(role: UserRole, college_id: Option<i64>, department_id: Option<i64>) -> User {
        User {
            id: 1,
            username: "someone".to_string(),
            email: "someone@example.com".to_string(),
            password_hash: String::new(),
            role,
            status: UserStatus::Active,
            display_name: None,
            college_id,
            department_id,
            last_login: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_college_scope() {
        let admin = user(UserRole::SystemAdmin, None, None);
        assert_eq!(scoped_college_id(&admin, None).ok(), Some(None));
        assert_eq!(scoped_college_id(&admin, Some(3)).ok(), Some(Some(3)));
        assert!(required_college_id(&admin, None).is_err());

        let college_admin = user(UserRole::CollegeAdmin, Some(2), None);
        assert_eq!(scoped_college_id(&college_admin, None).ok(), Some(Some(2)));
        assert_eq!(scoped_college_id(&college_admin, Some(2)).ok(), Some(Some(2)));
        assert!(scoped_college_id(&college_admin, Some(3)).is_err());
    }

    #[test]
    fn test_department_scope() {
        let hod = user(UserRole::Hod, Some(2), Some(5));
        assert_eq!(scoped_department_id(&hod, None).ok(), Some(Some(5)));
        assert!(scoped_department_id(&hod, Some(6)).is_err());

        let college_admin = user(UserRole::CollegeAdmin, Some(2), None);
        assert_eq!(scoped_department_id(&college_admin, Some(6)).ok(), Some(Some(6)));
    }

    #[test]
    fn test_record_access() {
        let teacher = user(UserRole::Teacher, Some(2), Some(5));
        assert!(ensure_record_access(&teacher, 2, Some(5)).is_ok());
        assert!(ensure_record_access(&teacher, 2, Some(6)).is_err());
        assert!(ensure_record_access(&teacher, 3, Some(5)).is_err());

        let admin = user(UserRole::SystemAdmin, None, None);
        assert!(ensure_record_access(&admin, 9, Some(9)).is_ok());
    }

    #[actix_web::test]
    async fn test_internal_error_hides_detail() {
        let resp = internal_error("Failed to list users", "no such table: users");
        assert_eq!(resp.status(), actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);
        let body = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["message"], "Failed to list users");
        assert!(!body.to_string().contains("no such table"));
    }

    #[test]
    fn test_write_error_maps_conflict() {
        let resp = write_error(
            "Failed to create college",
            CollegeAdminError::conflict("UNIQUE constraint failed: colleges.code"),
            ErrorCode::CollegeAlreadyExists,
        );
        assert_eq!(resp.status(), actix_web::http::StatusCode::CONFLICT);

        let resp = write_error(
            "Failed to create college",
            CollegeAdminError::database_operation("disk I/O error"),
            ErrorCode::CollegeAlreadyExists,
        );
        assert_eq!(resp.status(), actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);
    }
}
