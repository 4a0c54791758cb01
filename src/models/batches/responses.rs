use super::entities::Batch;
use crate::models::common::PaginatedResponse;
use serde::Serialize;

pub type BatchListResponse = PaginatedResponse<Batch>;

/// 届别毕业结果
#[derive(Debug, Serialize)]
pub struct GraduateBatchResponse {
    pub batch: Batch,
    pub graduated_students: u64,
}
