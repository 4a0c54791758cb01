use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CollegeService;
use crate::models::colleges::requests::CreateCollegeRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{bad_request, conflict, internal_error, write_error};
use crate::utils::validate::validate_email;

pub async fn create_college(
    service: &CollegeService,
    request: &HttpRequest,
    mut college: CreateCollegeRequest,
) -> ActixResult<HttpResponse> {
    college.name = college.name.trim().to_string();
    college.code = college.code.trim().to_uppercase();

    if college.name.is_empty() || college.code.is_empty() {
        return Ok(bad_request(
            ErrorCode::BadRequest,
            "College name and code are required",
        ));
    }
    if let Some(email) = &college.contact_email
        && let Err(msg) = validate_email(email)
    {
        return Ok(bad_request(ErrorCode::BadRequest, msg));
    }

    let storage = service.get_storage(request);

    match storage
        .get_college_by_name_or_code(&college.name, &college.code)
        .await
    {
        Ok(Some(_)) => {
            return Ok(conflict(
                ErrorCode::CollegeAlreadyExists,
                "College name or code already exists",
            ));
        }
        Ok(None) => {}
        Err(e) => return Ok(internal_error("Failed to check college uniqueness", e)),
    }

    match storage.create_college(college).await {
        Ok(college) => {
            info!("College {} ({}) created", college.name, college.code);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                college,
                "College created successfully",
            )))
        }
        Err(e) => Ok(write_error(
            "Failed to create college",
            e,
            ErrorCode::CollegeAlreadyExists,
        )),
    }
}
