use super::entities::College;
use crate::models::common::PaginatedResponse;

pub type CollegeListResponse = PaginatedResponse<College>;
