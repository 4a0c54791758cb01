use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::BatchService;
use crate::models::batches::responses::GraduateBatchResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{conflict, current_user, internal_error, not_found};

pub async fn graduate_batch(
    service: &BatchService,
    request: &HttpRequest,
    batch_id: i64,
) -> ActixResult<HttpResponse> {
    let user = respond_on_err!(current_user(request));
    let batch = respond_on_err!(service.load_for_write(request, &user, batch_id).await);

    if batch.graduated {
        return Ok(conflict(
            ErrorCode::BatchAlreadyGraduated,
            "Batch has already graduated",
        ));
    }

    match service.get_storage(request).graduate_batch(batch_id).await {
        Ok(Some((batch, graduated_students))) => {
            info!(
                "Batch {} graduated by user {}: {} students",
                batch.name, user.id, graduated_students
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                GraduateBatchResponse {
                    batch,
                    graduated_students,
                },
                "Batch graduated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::BatchNotFound, "Batch not found")),
        Err(e) => Ok(internal_error("Failed to graduate batch", e)),
    }
}
