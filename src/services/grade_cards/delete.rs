use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeCardService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{current_user, internal_error, not_found};

pub async fn delete_grade_entry(
    service: &GradeCardService,
    request: &HttpRequest,
    entry_id: i64,
) -> ActixResult<HttpResponse> {
    let user = respond_on_err!(current_user(request));
    let storage = service.get_storage(request);

    let entry = match storage.get_grade_entry_by_id(entry_id).await {
        Ok(Some(entry)) => entry,
        Ok(None) => {
            return Ok(not_found(
                ErrorCode::GradeEntryNotFound,
                "Grade entry not found",
            ));
        }
        Err(e) => return Ok(internal_error("Failed to get grade entry", e)),
    };
    respond_on_err!(service.load_student(request, &user, entry.student_id).await);

    match storage.delete_grade_entry(entry_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Grade entry deleted successfully",
        ))),
        Ok(false) => Ok(not_found(
            ErrorCode::GradeEntryNotFound,
            "Grade entry not found",
        )),
        Err(e) => Ok(internal_error("Failed to delete grade entry", e)),
    }
}
