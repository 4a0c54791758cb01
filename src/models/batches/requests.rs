use crate::models::common::{PaginationQuery, pagination::deserialize_optional_i64};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct BatchQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub college_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub department_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateBatchRequest {
    pub department_id: i64,
    pub name: String,
    pub start_year: i32,
    pub end_year: i32,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBatchRequest {
    pub name: Option<String>,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
}

// 届别列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct BatchListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub college_id: Option<i64>,
    pub department_id: Option<i64>,
}

/// 校验届别年份区间
pub fn validate_batch_years(start_year: i32, end_year: i32) -> Result<(), &'static str> {
    if !(1900..=2200).contains(&start_year) || !(1900..=2200).contains(&end_year) {
        return Err("Batch years must be between 1900 and 2200");
    }
    if start_year > end_year {
        return Err("Batch start year must not be after end year");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_batch_years() {
        assert!(validate_batch_years(2021, 2025).is_ok());
        assert!(validate_batch_years(2025, 2025).is_ok());
        assert!(validate_batch_years(2026, 2025).is_err());
        assert!(validate_batch_years(1800, 2025).is_err());
    }
}
