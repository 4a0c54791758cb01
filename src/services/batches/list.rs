use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::BatchService;
use crate::models::ApiResponse;
use crate::models::batches::requests::{BatchListQuery, BatchQueryParams};
use crate::services::access::{current_user, internal_error, scoped_college_id};

pub async fn list_batches(
    service: &BatchService,
    request: &HttpRequest,
    query: BatchQueryParams,
) -> ActixResult<HttpResponse> {
    let user = respond_on_err!(current_user(request));
    let college_id = respond_on_err!(scoped_college_id(&user, query.college_id));

    let list_query = BatchListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        college_id,
        department_id: query.department_id,
    };

    match service
        .get_storage(request)
        .list_batches_with_pagination(list_query)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Batches retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list batches", e)),
    }
}
