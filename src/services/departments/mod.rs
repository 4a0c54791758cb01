pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::departments::entities::Department;
use crate::models::departments::requests::{
    CreateDepartmentRequest, DepartmentQueryParams, UpdateDepartmentRequest,
};
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{
    Access, bad_request, ensure_record_access, internal_error, not_found,
};
use crate::storage::Storage;

pub struct DepartmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl DepartmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    /// 读取院系并检查学院范围
    pub(crate) async fn load_in_scope(
        &self,
        request: &HttpRequest,
        user: &User,
        department_id: i64,
    ) -> Access<Department> {
        let department = match self.get_storage(request).get_department_by_id(department_id).await {
            Ok(Some(department)) => department,
            Ok(None) => {
                return Err(not_found(
                    ErrorCode::DepartmentNotFound,
                    "Department not found",
                ));
            }
            Err(e) => return Err(internal_error("Failed to get department", e)),
        };
        ensure_record_access(user, department.college_id, None)?;
        Ok(department)
    }

    /// 系主任必须是同一学院中角色为 hod 的用户
    pub(crate) async fn check_hod(
        &self,
        request: &HttpRequest,
        college_id: i64,
        hod_id: i64,
    ) -> Access<()> {
        match self.get_storage(request).get_user_by_id(hod_id).await {
            Ok(Some(hod)) if hod.role == UserRole::Hod && hod.college_id == Some(college_id) => {
                Ok(())
            }
            Ok(_) => Err(bad_request(
                ErrorCode::HodInvalid,
                "HOD must be a user with role hod in the same college",
            )),
            Err(e) => Err(internal_error("Failed to check HOD", e)),
        }
    }

    pub async fn list_departments(
        &self,
        request: &HttpRequest,
        query: DepartmentQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_departments(self, request, query).await
    }

    pub async fn create_department(
        &self,
        request: &HttpRequest,
        department: CreateDepartmentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_department(self, request, department).await
    }

    pub async fn get_department(
        &self,
        request: &HttpRequest,
        department_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_department(self, request, department_id).await
    }

    pub async fn update_department(
        &self,
        request: &HttpRequest,
        department_id: i64,
        update: UpdateDepartmentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_department(self, request, department_id, update).await
    }

    pub async fn delete_department(
        &self,
        request: &HttpRequest,
        department_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_department(self, request, department_id).await
    }
}

pub(crate) fn department_response(department: Department, message: &str) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(department, message))
}
