use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, guard, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::grade_cards::requests::{CreateGradeEntryRequest, GradeCardQuery};
use crate::models::users::entities::UserRole;
use crate::services::GradeCardService;
use crate::utils::SafeIDI64;

static GRADE_CARD_SERVICE: Lazy<GradeCardService> = Lazy::new(GradeCardService::new_lazy);

pub async fn get_grade_card(
    req: HttpRequest,
    query: web::Query<GradeCardQuery>,
) -> ActixResult<HttpResponse> {
    GRADE_CARD_SERVICE
        .get_grade_card(&req, query.into_inner())
        .await
}

pub async fn create_grade_entry(
    req: HttpRequest,
    entry: web::Json<CreateGradeEntryRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_CARD_SERVICE
        .create_grade_entry(&req, entry.into_inner())
        .await
}

pub async fn delete_grade_entry(req: HttpRequest, entry_id: SafeIDI64) -> ActixResult<HttpResponse> {
    GRADE_CARD_SERVICE.delete_grade_entry(&req, entry_id.0).await
}

pub fn configure_grade_card_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/gradeCard")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .guard(guard::Get())
                    .route("", web::get().to(get_grade_card)),
            )
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(
                        UserRole::academic_staff_roles(),
                    ))
                    .route("", web::post().to(create_grade_entry))
                    .route("/{id}", web::delete().to(delete_grade_entry)),
            ),
    );
}
