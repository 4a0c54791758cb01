use super::entities::LoadBalancingPdf;
use crate::models::common::PaginatedResponse;

pub type LoadBalancingPdfListResponse = PaginatedResponse<LoadBalancingPdf>;
