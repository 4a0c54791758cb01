use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::{
    ApiResponse,
    users::requests::{UserListParams, UserListQuery},
};
use crate::services::access::{
    current_user, internal_error, scoped_college_id, scoped_department_id,
};

pub async fn list_users(
    service: &UserService,
    query: UserListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = respond_on_err!(current_user(request));
    let college_id = respond_on_err!(scoped_college_id(&user, query.college_id));
    let department_id = respond_on_err!(scoped_department_id(&user, query.department_id));

    let list_query = UserListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        college_id,
        department_id,
        roles: query.role.map(|role| vec![role]),
        status: query.status,
        search: query.search,
    };

    match service
        .get_storage(request)
        .list_users_with_pagination(list_query)
        .await
    {
        Ok(users) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            users,
            "Users retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list users", e)),
    }
}
