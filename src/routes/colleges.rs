use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, guard, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::colleges::requests::{
    CollegeQueryParams, CreateCollegeRequest, UpdateCollegeRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::CollegeService;
use crate::utils::SafeIDI64;

static COLLEGE_SERVICE: Lazy<CollegeService> = Lazy::new(CollegeService::new_lazy);

pub async fn list_colleges(
    req: HttpRequest,
    query: web::Query<CollegeQueryParams>,
) -> ActixResult<HttpResponse> {
    COLLEGE_SERVICE.list_colleges(&req, query.into_inner()).await
}

pub async fn create_college(
    req: HttpRequest,
    college: web::Json<CreateCollegeRequest>,
) -> ActixResult<HttpResponse> {
    COLLEGE_SERVICE
        .create_college(&req, college.into_inner())
        .await
}

pub async fn get_college(req: HttpRequest, college_id: SafeIDI64) -> ActixResult<HttpResponse> {
    COLLEGE_SERVICE.get_college(&req, college_id.0).await
}

pub async fn update_college(
    req: HttpRequest,
    college_id: SafeIDI64,
    update: web::Json<UpdateCollegeRequest>,
) -> ActixResult<HttpResponse> {
    COLLEGE_SERVICE
        .update_college(&req, college_id.0, update.into_inner())
        .await
}

pub async fn delete_college(req: HttpRequest, college_id: SafeIDI64) -> ActixResult<HttpResponse> {
    COLLEGE_SERVICE.delete_college(&req, college_id.0).await
}

// 读取对所有登录用户开放（服务层限定范围），写操作仅系统管理员
pub fn configure_college_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/college")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .guard(guard::Get())
                    .route("", web::get().to(list_colleges))
                    .route("/{id}", web::get().to(get_college)),
            )
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new(UserRole::SystemAdmin))
                    .route("", web::post().to(create_college))
                    .route("/{id}", web::put().to(update_college))
                    .route("/{id}", web::delete().to(delete_college)),
            ),
    );
}
