use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{DepartmentService, department_response};
use crate::services::access::current_user;

pub async fn get_department(
    service: &DepartmentService,
    request: &HttpRequest,
    department_id: i64,
) -> ActixResult<HttpResponse> {
    let user = respond_on_err!(current_user(request));
    let department = respond_on_err!(service.load_in_scope(request, &user, department_id).await);
    Ok(department_response(
        department,
        "Department retrieved successfully",
    ))
}
