use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, guard, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::batches::requests::{BatchQueryParams, CreateBatchRequest, UpdateBatchRequest};
use crate::models::users::entities::UserRole;
use crate::services::BatchService;
use crate::utils::SafeIDI64;

static BATCH_SERVICE: Lazy<BatchService> = Lazy::new(BatchService::new_lazy);

pub async fn list_batches(
    req: HttpRequest,
    query: web::Query<BatchQueryParams>,
) -> ActixResult<HttpResponse> {
    BATCH_SERVICE.list_batches(&req, query.into_inner()).await
}

pub async fn create_batch(
    req: HttpRequest,
    batch: web::Json<CreateBatchRequest>,
) -> ActixResult<HttpResponse> {
    BATCH_SERVICE.create_batch(&req, batch.into_inner()).await
}

pub async fn update_batch(
    req: HttpRequest,
    batch_id: SafeIDI64,
    update: web::Json<UpdateBatchRequest>,
) -> ActixResult<HttpResponse> {
    BATCH_SERVICE
        .update_batch(&req, batch_id.0, update.into_inner())
        .await
}

pub async fn delete_batch(req: HttpRequest, batch_id: SafeIDI64) -> ActixResult<HttpResponse> {
    BATCH_SERVICE.delete_batch(&req, batch_id.0).await
}

pub async fn graduate_batch(req: HttpRequest, batch_id: SafeIDI64) -> ActixResult<HttpResponse> {
    BATCH_SERVICE.graduate_batch(&req, batch_id.0).await
}

pub fn configure_batch_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/batch")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .guard(guard::Get())
                    .route("", web::get().to(list_batches)),
            )
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::manager_roles()))
                    .route("", web::post().to(create_batch))
                    .route("/{id}", web::put().to(update_batch))
                    .route("/{id}", web::delete().to(delete_batch))
                    .route("/{id}/graduate", web::post().to(graduate_batch)),
            ),
    );
}
