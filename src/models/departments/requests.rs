use crate::models::common::{PaginationQuery, pagination::deserialize_optional_i64};
use serde::Deserialize;

// 院系查询参数（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct DepartmentQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    /// 仅系统管理员可指定，其余角色固定为本学院
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub college_id: Option<i64>,
    pub search: Option<String>,
}

// 指定院系的查询参数：/api/department/specificDepartment?id=
#[derive(Debug, Deserialize)]
pub struct SpecificDepartmentParams {
    pub id: i64,
}

// 创建院系请求
#[derive(Debug, Deserialize)]
pub struct CreateDepartmentRequest {
    pub college_id: Option<i64>,
    pub name: String,
    pub code: String,
    pub hod_id: Option<i64>,
}

// 更新院系请求
#[derive(Debug, Deserialize)]
pub struct UpdateDepartmentRequest {
    pub name: Option<String>,
    pub code: Option<String>,
    pub hod_id: Option<i64>,
}

// 院系列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct DepartmentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub college_id: Option<i64>,
    pub search: Option<String>,
}
