use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{DepartmentService, department_response};
use crate::models::ErrorCode;
use crate::models::departments::requests::UpdateDepartmentRequest;
use crate::services::access::{
    bad_request, conflict, current_user, internal_error, not_found, write_error,
};

pub async fn update_department(
    service: &DepartmentService,
    request: &HttpRequest,
    department_id: i64,
    mut update: UpdateDepartmentRequest,
) -> ActixResult<HttpResponse> {
    let user = respond_on_err!(current_user(request));
    let department = respond_on_err!(service.load_in_scope(request, &user, department_id).await);
    let storage = service.get_storage(request);

    if let Some(name) = update.name.as_mut() {
        *name = name.trim().to_string();
        if name.is_empty() {
            return Ok(bad_request(
                ErrorCode::BadRequest,
                "Department name cannot be empty",
            ));
        }
    }

    if let Some(code) = update.code.as_mut() {
        *code = code.trim().to_uppercase();
        match storage
            .get_department_by_code(department.college_id, code)
            .await
        {
            Ok(Some(existing)) if existing.id != department_id => {
                return Ok(conflict(
                    ErrorCode::DepartmentAlreadyExists,
                    "Department code already exists in this college",
                ));
            }
            Ok(_) => {}
            Err(e) => return Ok(internal_error("Failed to check department code", e)),
        }
    }

    if let Some(hod_id) = update.hod_id {
        respond_on_err!(
            service
                .check_hod(request, department.college_id, hod_id)
                .await
        );
    }

    match storage.update_department(department_id, update).await {
        Ok(Some(department)) => Ok(department_response(
            department,
            "Department updated successfully",
        )),
        Ok(None) => Ok(not_found(
            ErrorCode::DepartmentNotFound,
            "Department not found",
        )),
        Err(e) => Ok(write_error(
            "Failed to update department",
            e,
            ErrorCode::DepartmentAlreadyExists,
        )),
    }
}
