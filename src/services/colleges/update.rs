use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CollegeService;
use crate::models::colleges::requests::UpdateCollegeRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{bad_request, conflict, internal_error, not_found, write_error};
use crate::utils::validate::validate_email;

pub async fn update_college(
    service: &CollegeService,
    request: &HttpRequest,
    college_id: i64,
    mut update: UpdateCollegeRequest,
) -> ActixResult<HttpResponse> {
    if let Some(name) = update.name.as_mut() {
        *name = name.trim().to_string();
        if name.is_empty() {
            return Ok(bad_request(ErrorCode::BadRequest, "College name cannot be empty"));
        }
    }
    if let Some(email) = &update.contact_email
        && let Err(msg) = validate_email(email)
    {
        return Ok(bad_request(ErrorCode::BadRequest, msg));
    }

    let storage = service.get_storage(request);

    // 名称唯一
    if let Some(name) = &update.name {
        match storage.get_college_by_name_or_code(name, "").await {
            Ok(Some(existing)) if existing.id != college_id => {
                return Ok(conflict(
                    ErrorCode::CollegeAlreadyExists,
                    "College name already exists",
                ));
            }
            Ok(_) => {}
            Err(e) => return Ok(internal_error("Failed to check college uniqueness", e)),
        }
    }

    match storage.update_college(college_id, update).await {
        Ok(Some(college)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            college,
            "College updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::CollegeNotFound, "College not found")),
        Err(e) => Ok(write_error(
            "Failed to update college",
            e,
            ErrorCode::CollegeAlreadyExists,
        )),
    }
}
