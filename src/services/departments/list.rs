use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DepartmentService;
use crate::models::ApiResponse;
use crate::models::departments::requests::{DepartmentListQuery, DepartmentQueryParams};
use crate::services::access::{current_user, internal_error, scoped_college_id};

pub async fn list_departments(
    service: &DepartmentService,
    request: &HttpRequest,
    query: DepartmentQueryParams,
) -> ActixResult<HttpResponse> {
    let user = respond_on_err!(current_user(request));
    let college_id = respond_on_err!(scoped_college_id(&user, query.college_id));

    let list_query = DepartmentListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        college_id,
        search: query.search,
    };

    match service
        .get_storage(request)
        .list_departments_with_pagination(list_query)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Departments retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list departments", e)),
    }
}
