use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::PaymentService;
use crate::models::ApiResponse;
use crate::models::payments::requests::{PaymentListQuery, PaymentQueryParams};
use crate::models::users::entities::UserRole;
use crate::services::access::{current_user, internal_error};

pub async fn list_payments(
    service: &PaymentService,
    request: &HttpRequest,
    query: PaymentQueryParams,
) -> ActixResult<HttpResponse> {
    let user = respond_on_err!(current_user(request));

    // 系统管理员看全部，学院管理员看本学院，其他角色只看自己的
    let (college_id, user_id) = match user.role {
        UserRole::SystemAdmin => (None, None),
        UserRole::CollegeAdmin => (user.college_id, None),
        _ => (None, Some(user.id)),
    };

    let list_query = PaymentListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        college_id,
        user_id,
        status: query.status,
    };

    match service
        .get_storage(request)
        .list_payments_with_pagination(list_query)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Payments retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list payments", e)),
    }
}
