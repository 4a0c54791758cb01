use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::DepartmentService;
use crate::models::departments::requests::CreateDepartmentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{
    bad_request, conflict, current_user, internal_error, not_found, required_college_id,
    write_error,
};

pub async fn create_department(
    service: &DepartmentService,
    request: &HttpRequest,
    mut department: CreateDepartmentRequest,
) -> ActixResult<HttpResponse> {
    let user = respond_on_err!(current_user(request));
    let college_id = respond_on_err!(required_college_id(&user, department.college_id));

    department.name = department.name.trim().to_string();
    department.code = department.code.trim().to_uppercase();
    if department.name.is_empty() || department.code.is_empty() {
        return Ok(bad_request(
            ErrorCode::BadRequest,
            "Department name and code are required",
        ));
    }

    let storage = service.get_storage(request);

    match storage.get_college_by_id(college_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::CollegeNotFound, "College not found")),
        Err(e) => return Ok(internal_error("Failed to get college", e)),
    }

    match storage
        .get_department_by_code(college_id, &department.code)
        .await
    {
        Ok(Some(_)) => {
            return Ok(conflict(
                ErrorCode::DepartmentAlreadyExists,
                "Department code already exists in this college",
            ));
        }
        Ok(None) => {}
        Err(e) => return Ok(internal_error("Failed to check department code", e)),
    }

    if let Some(hod_id) = department.hod_id {
        respond_on_err!(service.check_hod(request, college_id, hod_id).await);
    }

    match storage.create_department(college_id, department).await {
        Ok(department) => {
            info!(
                "Department {} created in college {}",
                department.code, college_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                department,
                "Department created successfully",
            )))
        }
        Err(e) => Ok(write_error(
            "Failed to create department",
            e,
            ErrorCode::DepartmentAlreadyExists,
        )),
    }
}
