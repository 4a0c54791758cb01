use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::{ApiResponse, users::responses::UserResponse};
use crate::services::access::current_user;

pub async fn get_user(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = respond_on_err!(current_user(request));
    let user = respond_on_err!(service.load_visible(request, &actor, user_id).await);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        UserResponse { user },
        "User retrieved successfully",
    )))
}
