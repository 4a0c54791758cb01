use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{StudentService, ensure_can_manage_students};
use crate::models::students::requests::UpdateStudentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{
    bad_request, conflict, current_user, internal_error, invalidate_user_cache, not_found,
    write_error,
};
use crate::utils::validate::validate_email;

pub async fn update_student(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
    mut update: UpdateStudentRequest,
) -> ActixResult<HttpResponse> {
    let user = respond_on_err!(current_user(request));
    respond_on_err!(ensure_can_manage_students(&user));
    let current = respond_on_err!(service.load_in_scope(request, &user, student_id).await);
    let storage = service.get_storage(request);

    if let Some(email) = update.email.as_mut() {
        *email = email.trim().to_lowercase();
        if let Err(msg) = validate_email(email) {
            return Ok(bad_request(ErrorCode::UserEmailInvalid, msg));
        }
        match storage.get_user_by_email(email).await {
            Ok(Some(existing)) if existing.id != current.student.user_id => {
                return Ok(conflict(
                    ErrorCode::UserEmailAlreadyExists,
                    "Email already exists",
                ));
            }
            Ok(_) => {}
            Err(e) => return Ok(internal_error("Failed to check email", e)),
        }
    }

    if let Some(roll_number) = update.roll_number.as_mut() {
        *roll_number = roll_number.trim().to_uppercase();
        if roll_number.is_empty() {
            return Ok(bad_request(ErrorCode::BadRequest, "Roll number cannot be empty"));
        }
        match storage
            .get_student_by_roll_number(current.student.college_id, roll_number)
            .await
        {
            Ok(Some(existing)) if existing.student.id != student_id => {
                return Ok(conflict(
                    ErrorCode::StudentAlreadyExists,
                    "Roll number already exists in this college",
                ));
            }
            Ok(_) => {}
            Err(e) => return Ok(internal_error("Failed to check roll number", e)),
        }
    }

    if let Some(batch_id) = update.batch_id {
        respond_on_err!(
            service
                .check_batch(request, current.student.department_id, batch_id)
                .await
        );
    }

    match storage.update_student(student_id, update).await {
        Ok(Some(detail)) => {
            invalidate_user_cache(request, detail.student.user_id).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                detail,
                "Student updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => Ok(write_error("Failed to update student", e, ErrorCode::Conflict)),
    }
}
