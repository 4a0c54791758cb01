use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::GradeCardService;
use crate::models::grade_cards::requests::CreateGradeEntryRequest;
use crate::models::students::entities::StudentStatus;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{bad_request, conflict, current_user, internal_error, write_error};

pub async fn create_grade_entry(
    service: &GradeCardService,
    request: &HttpRequest,
    mut entry: CreateGradeEntryRequest,
) -> ActixResult<HttpResponse> {
    let user = respond_on_err!(current_user(request));

    entry.subject_code = entry.subject_code.trim().to_uppercase();
    entry.subject_name = entry.subject_name.trim().to_string();
    if let Err(msg) = entry.validate() {
        return Ok(bad_request(ErrorCode::GradeEntryInvalid, msg));
    }

    let student = respond_on_err!(service.load_student(request, &user, entry.student_id).await);
    if student.student.status == StudentStatus::Dropped {
        return Ok(bad_request(
            ErrorCode::GradeEntryInvalid,
            "Cannot add grades for a dropped student",
        ));
    }

    let storage = service.get_storage(request);

    // 同一学期同一课程只记录一次
    match storage
        .find_grade_entry(entry.student_id, entry.semester, &entry.subject_code)
        .await
    {
        Ok(Some(_)) => {
            return Ok(conflict(
                ErrorCode::GradeEntryAlreadyExists,
                "Grade entry already exists for this subject and semester",
            ));
        }
        Ok(None) => {}
        Err(e) => return Ok(internal_error("Failed to check grade entry", e)),
    }

    match storage.create_grade_entry(entry, user.id).await {
        Ok(entry) => {
            info!(
                "Grade {} recorded for student {} ({}) by {}",
                entry.grade_letter, entry.student_id, entry.subject_code, user.username
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                entry,
                "Grade entry created successfully",
            )))
        }
        Err(e) => Ok(write_error(
            "Failed to create grade entry",
            e,
            ErrorCode::GradeEntryAlreadyExists,
        )),
    }
}
