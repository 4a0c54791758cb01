use crate::models::common::PaginationQuery;
use serde::Deserialize;

// 学院查询参数（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct CollegeQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

// 创建学院请求
#[derive(Debug, Deserialize)]
pub struct CreateCollegeRequest {
    pub name: String,
    pub code: String,
    pub address: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
}

// 更新学院请求
#[derive(Debug, Deserialize)]
pub struct UpdateCollegeRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
}

// 学院列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct CollegeListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub college_id: Option<i64>,
    pub search: Option<String>,
}
