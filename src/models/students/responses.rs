use super::entities::StudentDetail;
use crate::models::common::PaginatedResponse;

pub type StudentListResponse = PaginatedResponse<StudentDetail>;
