use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DepartmentService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{current_user, internal_error, not_found};

pub async fn delete_department(
    service: &DepartmentService,
    request: &HttpRequest,
    department_id: i64,
) -> ActixResult<HttpResponse> {
    let user = respond_on_err!(current_user(request));
    respond_on_err!(service.load_in_scope(request, &user, department_id).await);

    match service
        .get_storage(request)
        .delete_department(department_id)
        .await
    {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Department deleted successfully",
        ))),
        Ok(false) => Ok(not_found(
            ErrorCode::DepartmentNotFound,
            "Department not found",
        )),
        Err(e) => Ok(internal_error("Failed to delete department", e)),
    }
}
