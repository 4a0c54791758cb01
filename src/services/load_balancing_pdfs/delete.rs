use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::fs;
use tracing::warn;

use super::{LoadBalancingPdfService, stored_path};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{current_user, internal_error, not_found};

pub async fn delete_pdf(
    service: &LoadBalancingPdfService,
    request: &HttpRequest,
    pdf_id: i64,
) -> ActixResult<HttpResponse> {
    let user = respond_on_err!(current_user(request));
    let pdf = respond_on_err!(service.load_in_scope(request, &user, pdf_id, true).await);

    match service
        .get_storage(request)
        .delete_load_balancing_pdf(pdf_id)
        .await
    {
        Ok(true) => {
            if let Err(e) = fs::remove_file(stored_path(&pdf.stored_name)) {
                warn!("Failed to remove stored file {}: {}", pdf.stored_name, e);
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("File deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::FileNotFound, "File not found")),
        Err(e) => Ok(internal_error("Failed to delete file", e)),
    }
}
