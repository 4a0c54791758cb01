use super::entities::{UserRole, UserStatus};
use crate::models::common::{PaginationQuery, pagination::deserialize_optional_i64};
use serde::Deserialize;

// 用户查询参数（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct UserListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub department_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub college_id: Option<i64>,
    pub search: Option<String>,
}

// 用户创建请求
//
// # college_id / department_id 字段说明
// - 系统管理员创建学院管理员时必须指定 college_id
// - 学院管理员、系主任创建用户时 college_id 取自当前登录用户
// - 系主任、教师、学生、校友必须指定 department_id
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub display_name: Option<String>,
    pub college_id: Option<i64>,
    pub department_id: Option<i64>,
}

// 用户更新请求
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub status: Option<UserStatus>,
    pub display_name: Option<String>,
    pub department_id: Option<i64>,
}

// 用户列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct UserListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub college_id: Option<i64>,
    pub department_id: Option<i64>,
    pub roles: Option<Vec<UserRole>>,
    pub status: Option<UserStatus>,
    pub search: Option<String>,
}
