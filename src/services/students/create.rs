use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{StudentService, ensure_can_manage_students};
use crate::models::students::requests::{CreateStudentRequest, NewStudent};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{
    bad_request, conflict, current_user, ensure_record_access, internal_error, not_found,
    write_error,
};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password_simple, validate_username};

pub async fn create_student(
    service: &StudentService,
    request: &HttpRequest,
    student: CreateStudentRequest,
) -> ActixResult<HttpResponse> {
    let user = respond_on_err!(current_user(request));
    respond_on_err!(ensure_can_manage_students(&user));

    let username = student.username.trim().to_string();
    let email = student.email.trim().to_lowercase();
    let roll_number = student.roll_number.trim().to_uppercase();

    if let Err(msg) = validate_username(&username) {
        return Ok(bad_request(ErrorCode::UserNameInvalid, msg));
    }
    if let Err(msg) = validate_email(&email) {
        return Ok(bad_request(ErrorCode::UserEmailInvalid, msg));
    }
    if let Err(msg) = validate_password_simple(&student.password) {
        return Ok(bad_request(ErrorCode::PasswordPolicyViolation, msg));
    }
    if roll_number.is_empty() {
        return Ok(bad_request(ErrorCode::BadRequest, "Roll number is required"));
    }

    let storage = service.get_storage(request);

    let department = match storage.get_department_by_id(student.department_id).await {
        Ok(Some(department)) => department,
        Ok(None) => {
            return Ok(not_found(
                ErrorCode::DepartmentNotFound,
                "Department not found",
            ));
        }
        Err(e) => return Ok(internal_error("Failed to get department", e)),
    };
    respond_on_err!(ensure_record_access(
        &user,
        department.college_id,
        Some(department.id)
    ));

    if let Some(batch_id) = student.batch_id {
        respond_on_err!(service.check_batch(request, department.id, batch_id).await);
    }

    match storage
        .get_student_by_roll_number(department.college_id, &roll_number)
        .await
    {
        Ok(Some(_)) => {
            return Ok(conflict(
                ErrorCode::StudentAlreadyExists,
                "Roll number already exists in this college",
            ));
        }
        Ok(None) => {}
        Err(e) => return Ok(internal_error("Failed to check roll number", e)),
    }
    match storage.get_user_by_username(&username).await {
        Ok(Some(_)) => {
            return Ok(conflict(
                ErrorCode::UserNameAlreadyExists,
                "Username already exists",
            ));
        }
        Ok(None) => {}
        Err(e) => return Ok(internal_error("Failed to check username", e)),
    }
    match storage.get_user_by_email(&email).await {
        Ok(Some(_)) => {
            return Ok(conflict(
                ErrorCode::UserEmailAlreadyExists,
                "Email already exists",
            ));
        }
        Ok(None) => {}
        Err(e) => return Ok(internal_error("Failed to check email", e)),
    }

    let password_hash = match hash_password(&student.password) {
        Ok(hash) => hash,
        Err(e) => return Ok(internal_error("Password hashing failed", e)),
    };

    let new_student = NewStudent {
        username,
        email,
        password_hash,
        display_name: student.display_name,
        college_id: department.college_id,
        department_id: department.id,
        batch_id: student.batch_id,
        roll_number,
    };

    match storage.create_student(new_student).await {
        Ok(detail) => {
            info!(
                "Student {} created in department {}",
                detail.student.roll_number, detail.student.department_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                detail,
                "Student created successfully",
            )))
        }
        Err(e) => Ok(write_error("Failed to create student", e, ErrorCode::Conflict)),
    }
}
