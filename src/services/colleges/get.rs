use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CollegeService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{current_user, internal_error, not_found, scoped_college_id};

pub async fn get_college(
    service: &CollegeService,
    request: &HttpRequest,
    college_id: i64,
) -> ActixResult<HttpResponse> {
    let user = respond_on_err!(current_user(request));
    respond_on_err!(scoped_college_id(&user, Some(college_id)));

    let storage = service.get_storage(request);

    match storage.get_college_by_id(college_id).await {
        Ok(Some(college)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            college,
            "College retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::CollegeNotFound, "College not found")),
        Err(e) => Ok(internal_error("Failed to get college", e)),
    }
}
