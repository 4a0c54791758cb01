pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::ErrorCode;
use crate::models::students::entities::StudentDetail;
use crate::models::students::requests::{
    CreateStudentRequest, StudentQueryParams, UpdateStudentRequest,
};
use crate::models::users::entities::{User, UserRole};
use crate::services::access::{
    Access, bad_request, ensure_record_access, forbidden, internal_error, not_found,
};
use crate::storage::Storage;

pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentService {
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

    /// 读取学生并检查学院、院系范围
    pub(crate) async fn load_in_scope(
        &self,
        request: &HttpRequest,
        user: &User,
        student_id: i64,
    ) -> Access<StudentDetail> {
        let student = match self.get_storage(request).get_student_by_id(student_id).await {
            Ok(Some(student)) => student,
            Ok(None) => return Err(not_found(ErrorCode::StudentNotFound, "Student not found")),
            Err(e) => return Err(internal_error("Failed to get student", e)),
        };
        ensure_record_access(
            user,
            student.student.college_id,
            Some(student.student.department_id),
        )?;
        Ok(student)
    }

    /// 届别必须属于学生所在院系且尚未毕业
    pub(crate) async fn check_batch(
        &self,
        request: &HttpRequest,
        department_id: i64,
        batch_id: i64,
    ) -> Access<()> {
        match self.get_storage(request).get_batch_by_id(batch_id).await {
            Ok(Some(batch)) if batch.department_id == department_id && !batch.graduated => Ok(()),
            Ok(Some(_)) => Err(bad_request(
                ErrorCode::BatchInvalid,
                "Batch must belong to the student's department and not be graduated",
            )),
            Ok(None) => Err(not_found(ErrorCode::BatchNotFound, "Batch not found")),
            Err(e) => Err(internal_error("Failed to get batch", e)),
        }
    }

    pub async fn list_students(
        &self,
        request: &HttpRequest,
        query: StudentQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_students(self, request, query).await
    }

    // 同时创建登录账号和学籍
    pub async fn create_student(
        &self,
        request: &HttpRequest,
        student: CreateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_student(self, request, student).await
    }

    pub async fn get_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_student(self, request, student_id).await
    }

    pub async fn update_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
        update: UpdateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_student(self, request, student_id, update).await
    }

    pub async fn delete_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_student(self, request, student_id).await
    }
}

/// 学生账号的写权限
pub(crate) fn ensure_can_manage_students(user: &User) -> Access<()> {
    if user.role.can_manage(&UserRole::Student) {
        Ok(())
    } else {
        Err(forbidden(format!(
            "Role {} cannot manage student accounts",
            user.role
        )))
    }
}
