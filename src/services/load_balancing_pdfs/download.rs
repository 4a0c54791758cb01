use actix_web::{
    HttpRequest, HttpResponse, Result as ActixResult,
    http::header::{self, ContentDisposition, DispositionParam, DispositionType},
};
use std::fs;
use tracing::error;

use super::{LoadBalancingPdfService, stored_path};
use crate::errors::CollegeAdminError;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{current_user, not_found};

pub async fn download_pdf(
    service: &LoadBalancingPdfService,
    request: &HttpRequest,
    pdf_id: i64,
) -> ActixResult<HttpResponse> {
    let user = respond_on_err!(current_user(request));
    let pdf = respond_on_err!(service.load_in_scope(request, &user, pdf_id, false).await);

    let path = stored_path(&pdf.stored_name);
    if !path.exists() {
        return Ok(not_found(ErrorCode::FileNotFound, "File content is missing"));
    }

    let content = match fs::read(&path) {
        Ok(content) => content,
        Err(e) => {
            error!(
                "{}",
                CollegeAdminError::file_operation(format!("{}: {e}", path.display()))
            );
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "File read failed",
                )),
            );
        }
    };

    let content_type = if pdf.original_name.to_lowercase().ends_with(".pdf") {
        "application/pdf"
    } else {
        "application/octet-stream"
    };

    // 使用数据库中的原始文件名
    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, content_type))
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(pdf.original_name)],
        })
        .body(content))
}
