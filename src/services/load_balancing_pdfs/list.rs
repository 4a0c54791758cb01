use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LoadBalancingPdfService;
use crate::models::ApiResponse;
use crate::models::load_balancing_pdfs::requests::{
    LoadBalancingPdfListQuery, LoadBalancingPdfQueryParams,
};
use crate::services::access::{current_user, internal_error, scoped_college_id};

pub async fn list_pdfs(
    service: &LoadBalancingPdfService,
    request: &HttpRequest,
    query: LoadBalancingPdfQueryParams,
) -> ActixResult<HttpResponse> {
    let user = respond_on_err!(current_user(request));
    let college_id = respond_on_err!(scoped_college_id(&user, query.college_id));

    let list_query = LoadBalancingPdfListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        college_id,
        department_id: query.department_id,
        academic_year: query
            .academic_year
            .map(|year| year.trim().to_string())
            .filter(|year| !year.is_empty()),
    };

    match service
        .get_storage(request)
        .list_load_balancing_pdfs_with_pagination(list_query)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Files retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list files", e)),
    }
}
