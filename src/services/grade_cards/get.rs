use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeCardService;
use crate::models::grade_cards::{GradeCard, requests::GradeCardQuery};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{bad_request, current_user, forbidden, internal_error, not_found};

pub async fn get_grade_card(
    service: &GradeCardService,
    request: &HttpRequest,
    query: GradeCardQuery,
) -> ActixResult<HttpResponse> {
    let user = respond_on_err!(current_user(request));
    let storage = service.get_storage(request);

    let student = if UserRole::learner_roles().contains(&&user.role) {
        let own = match storage.get_student_by_user_id(user.id).await {
            Ok(Some(student)) => student,
            Ok(None) => {
                return Ok(not_found(
                    ErrorCode::StudentNotFound,
                    "No student record for current user",
                ));
            }
            Err(e) => return Ok(internal_error("Failed to get student", e)),
        };
        if let Some(student_id) = query.student_id
            && student_id != own.student.id
        {
            return Ok(forbidden("Students can only view their own grade card"));
        }
        own
    } else {
        let Some(student_id) = query.student_id else {
            return Ok(bad_request(ErrorCode::BadRequest, "student_id is required"));
        };
        respond_on_err!(service.load_student(request, &user, student_id).await)
    };

    match storage
        .list_grade_entries_by_student(student.student.id)
        .await
    {
        Ok(entries) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            GradeCard::build(student, entries),
            "Grade card retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list grade entries", e)),
    }
}
