pub mod create;
pub mod delete;
pub mod get;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::ErrorCode;
use crate::models::grade_cards::requests::{CreateGradeEntryRequest, GradeCardQuery};
use crate::models::students::entities::StudentDetail;
use crate::models::users::entities::User;
use crate::services::access::{Access, ensure_record_access, internal_error, not_found};
use crate::storage::Storage;

pub struct GradeCardService {
    storage: Option<Arc<dyn Storage>>,
}

impl GradeCardService {
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

    pub(crate) async fn load_student(
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

    // 成绩单：学生、校友查看自己的，教职工按 student_id 查看
    pub async fn get_grade_card(
        &self,
        request: &HttpRequest,
        query: GradeCardQuery,
    ) -> ActixResult<HttpResponse> {
        get::get_grade_card(self, request, query).await
    }

    pub async fn create_grade_entry(
        &self,
        request: &HttpRequest,
        entry: CreateGradeEntryRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_grade_entry(self, request, entry).await
    }

    pub async fn delete_grade_entry(
        &self,
        request: &HttpRequest,
        entry_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_grade_entry(self, request, entry_id).await
    }
}
