use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::warn;

use super::{StudentService, ensure_can_manage_students};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{current_user, internal_error, invalidate_user_cache, not_found};

pub async fn delete_student(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let user = respond_on_err!(current_user(request));
    respond_on_err!(ensure_can_manage_students(&user));
    let student = respond_on_err!(service.load_in_scope(request, &user, student_id).await);

    match service.get_storage(request).delete_student(student_id).await {
        Ok(true) => {
            invalidate_user_cache(request, student.student.user_id).await;
            warn!(
                "Student {} deleted by {}",
                student.student.roll_number, user.username
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Student deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => Ok(internal_error("Failed to delete student", e)),
    }
}
