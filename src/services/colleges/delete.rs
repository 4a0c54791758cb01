use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::warn;

use super::CollegeService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{internal_error, not_found};

pub async fn delete_college(
    service: &CollegeService,
    request: &HttpRequest,
    college_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_college(college_id).await {
        Ok(true) => {
            warn!("College {} deleted", college_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("College deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::CollegeNotFound, "College not found")),
        Err(e) => Ok(internal_error("Failed to delete college", e)),
    }
}
