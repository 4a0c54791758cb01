use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::ApiResponse;
use crate::models::students::requests::{StudentListQuery, StudentQueryParams};
use crate::services::access::{
    current_user, internal_error, scoped_college_id, scoped_department_id,
};

pub async fn list_students(
    service: &StudentService,
    request: &HttpRequest,
    query: StudentQueryParams,
) -> ActixResult<HttpResponse> {
    let user = respond_on_err!(current_user(request));
    let college_id = respond_on_err!(scoped_college_id(&user, query.college_id));
    let department_id = respond_on_err!(scoped_department_id(&user, query.department_id));

    let list_query = StudentListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        college_id,
        department_id,
        batch_id: query.batch_id,
        status: query.status,
        search: query.search,
    };

    match service
        .get_storage(request)
        .list_students_with_pagination(list_query)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Students retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list students", e)),
    }
}
