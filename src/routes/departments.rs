use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, guard, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::departments::requests::{
    CreateDepartmentRequest, DepartmentQueryParams, SpecificDepartmentParams,
    UpdateDepartmentRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::DepartmentService;

static DEPARTMENT_SERVICE: Lazy<DepartmentService> = Lazy::new(DepartmentService::new_lazy);

pub async fn list_departments(
    req: HttpRequest,
    query: web::Query<DepartmentQueryParams>,
) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE
        .list_departments(&req, query.into_inner())
        .await
}

pub async fn create_department(
    req: HttpRequest,
    department: web::Json<CreateDepartmentRequest>,
) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE
        .create_department(&req, department.into_inner())
        .await
}

pub async fn get_department(
    req: HttpRequest,
    params: web::Query<SpecificDepartmentParams>,
) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE.get_department(&req, params.id).await
}

pub async fn update_department(
    req: HttpRequest,
    params: web::Query<SpecificDepartmentParams>,
    update: web::Json<UpdateDepartmentRequest>,
) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE
        .update_department(&req, params.id, update.into_inner())
        .await
}

pub async fn delete_department(
    req: HttpRequest,
    params: web::Query<SpecificDepartmentParams>,
) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE.delete_department(&req, params.id).await
}

pub fn configure_department_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/department")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .guard(guard::Get())
                    .route("", web::get().to(list_departments))
                    .route("/specificDepartment", web::get().to(get_department)),
            )
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("", web::post().to(create_department))
                    .route("/specificDepartment", web::put().to(update_department))
                    .route("/specificDepartment", web::delete().to(delete_department)),
            ),
    );
}
