use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, guard, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RateLimit};
use crate::models::load_balancing_pdfs::requests::LoadBalancingPdfQueryParams;
use crate::models::users::entities::UserRole;
use crate::services::LoadBalancingPdfService;
use crate::utils::SafeIDI64;

static PDF_SERVICE: Lazy<LoadBalancingPdfService> = Lazy::new(LoadBalancingPdfService::new_lazy);

pub async fn list_pdfs(
    req: HttpRequest,
    query: web::Query<LoadBalancingPdfQueryParams>,
) -> ActixResult<HttpResponse> {
    PDF_SERVICE.list_pdfs(&req, query.into_inner()).await
}

pub async fn upload_pdf(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    PDF_SERVICE.upload_pdf(&req, payload).await
}

pub async fn download_pdf(req: HttpRequest, pdf_id: SafeIDI64) -> ActixResult<HttpResponse> {
    PDF_SERVICE.download_pdf(&req, pdf_id.0).await
}

pub async fn delete_pdf(req: HttpRequest, pdf_id: SafeIDI64) -> ActixResult<HttpResponse> {
    PDF_SERVICE.delete_pdf(&req, pdf_id.0).await
}

pub fn configure_load_balancing_pdf_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/loadBalancingPdf")
            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles()))
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .guard(guard::Get())
                    .route("", web::get().to(list_pdfs))
                    .route("/{id}/download", web::get().to(download_pdf)),
            )
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::manager_roles()))
                    .service(
                        web::resource("")
                            .wrap(RateLimit::file_upload())
                            .route(web::post().to(upload_pdf)),
                    )
                    .route("/{id}", web::delete().to(delete_pdf)),
            ),
    );
}
