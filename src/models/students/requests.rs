use super::entities::StudentStatus;
use crate::models::common::{PaginationQuery, pagination::deserialize_optional_i64};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct StudentQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub college_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub department_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub batch_id: Option<i64>,
    pub status: Option<StudentStatus>,
    pub search: Option<String>,
}

// 创建学生请求：同时创建登录账号
#[derive(Debug, Deserialize)]
pub struct CreateStudentRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
    pub department_id: i64,
    pub batch_id: Option<i64>,
    pub roll_number: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStudentRequest {
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub batch_id: Option<i64>,
    pub roll_number: Option<String>,
    pub status: Option<StudentStatus>,
}

// 学生列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct StudentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub college_id: Option<i64>,
    pub department_id: Option<i64>,
    pub batch_id: Option<i64>,
    pub status: Option<StudentStatus>,
    pub search: Option<String>,
}

/// 存储层创建学生所需的完整数据（密码已哈希）
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub display_name: Option<String>,
    pub college_id: i64,
    pub department_id: i64,
    pub batch_id: Option<i64>,
    pub roll_number: String,
}
