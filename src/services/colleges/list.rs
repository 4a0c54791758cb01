use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CollegeService;
use crate::models::ApiResponse;
use crate::models::colleges::requests::{CollegeListQuery, CollegeQueryParams};
use crate::services::access::{current_user, internal_error, scoped_college_id};

pub async fn list_colleges(
    service: &CollegeService,
    request: &HttpRequest,
    query: CollegeQueryParams,
) -> ActixResult<HttpResponse> {
    let user = respond_on_err!(current_user(request));
    // 非系统管理员只能看到本学院
    let college_id = respond_on_err!(scoped_college_id(&user, None));

    let storage = service.get_storage(request);
    let list_query = CollegeListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        college_id,
        search: query.search,
    };

    match storage.list_colleges_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Colleges retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list colleges", e)),
    }
}
