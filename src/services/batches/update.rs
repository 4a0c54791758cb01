use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::BatchService;
use crate::models::batches::requests::{UpdateBatchRequest, validate_batch_years};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{bad_request, current_user, internal_error, not_found};

pub async fn update_batch(
    service: &BatchService,
    request: &HttpRequest,
    batch_id: i64,
    mut update: UpdateBatchRequest,
) -> ActixResult<HttpResponse> {
    let user = respond_on_err!(current_user(request));
    let batch = respond_on_err!(service.load_for_write(request, &user, batch_id).await);

    if let Some(name) = update.name.as_mut() {
        *name = name.trim().to_string();
        if name.is_empty() {
            return Ok(bad_request(ErrorCode::BatchInvalid, "Batch name cannot be empty"));
        }
    }
    // 与未修改的一端组合后再校验
    let start_year = update.start_year.unwrap_or(batch.start_year);
    let end_year = update.end_year.unwrap_or(batch.end_year);
    if let Err(msg) = validate_batch_years(start_year, end_year) {
        return Ok(bad_request(ErrorCode::BatchInvalid, msg));
    }

    match service
        .get_storage(request)
        .update_batch(batch_id, update)
        .await
    {
        Ok(Some(batch)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(batch, "Batch updated successfully")))
        }
        Ok(None) => Ok(not_found(ErrorCode::BatchNotFound, "Batch not found")),
        Err(e) => Ok(internal_error("Failed to update batch", e)),
    }
}
