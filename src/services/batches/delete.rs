use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::BatchService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{current_user, internal_error, not_found};

pub async fn delete_batch(
    service: &BatchService,
    request: &HttpRequest,
    batch_id: i64,
) -> ActixResult<HttpResponse> {
    let user = respond_on_err!(current_user(request));
    respond_on_err!(service.load_for_write(request, &user, batch_id).await);

    match service.get_storage(request).delete_batch(batch_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Batch deleted successfully"))),
        Ok(false) => Ok(not_found(ErrorCode::BatchNotFound, "Batch not found")),
        Err(e) => Ok(internal_error("Failed to delete batch", e)),
    }
}
