use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::BatchService;
use crate::models::batches::requests::{CreateBatchRequest, validate_batch_years};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{
    bad_request, current_user, ensure_record_access, internal_error, not_found,
};

pub async fn create_batch(
    service: &BatchService,
    request: &HttpRequest,
    mut batch: CreateBatchRequest,
) -> ActixResult<HttpResponse> {
    let user = respond_on_err!(current_user(request));

    batch.name = batch.name.trim().to_string();
    if batch.name.is_empty() {
        return Ok(bad_request(ErrorCode::BatchInvalid, "Batch name is required"));
    }
    if let Err(msg) = validate_batch_years(batch.start_year, batch.end_year) {
        return Ok(bad_request(ErrorCode::BatchInvalid, msg));
    }

    let storage = service.get_storage(request);

    // 届别归属院系所在学院
    let department = match storage.get_department_by_id(batch.department_id).await {
        Ok(Some(department)) => department,
        Ok(None) => {
            return Ok(not_found(
                ErrorCode::DepartmentNotFound,
                "Department not found",
            ));
        }
        Err(e) => return Ok(internal_error("Failed to get department", e)),
    };
    respond_on_err!(ensure_record_access(
        &user,
        department.college_id,
        Some(department.id)
    ));

    match storage.create_batch(department.college_id, batch).await {
        Ok(batch) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(batch, "Batch created successfully"))),
        Err(e) => Ok(internal_error("Failed to create batch", e)),
    }
}
