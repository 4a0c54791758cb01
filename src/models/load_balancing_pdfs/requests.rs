use crate::models::common::{PaginationQuery, pagination::deserialize_optional_i64};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LoadBalancingPdfQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub college_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub department_id: Option<i64>,
    pub academic_year: Option<String>,
}

/// 存储层记录上传结果
#[derive(Debug, Clone)]
pub struct CreateLoadBalancingPdf {
    pub college_id: i64,
    pub department_id: i64,
    pub uploaded_by: i64,
    pub title: String,
    pub academic_year: String,
    pub original_name: String,
    pub stored_name: String,
    pub file_size: i64,
}

#[derive(Debug, Clone, Default)]
pub struct LoadBalancingPdfListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub college_id: Option<i64>,
    pub department_id: Option<i64>,
    pub academic_year: Option<String>,
}
