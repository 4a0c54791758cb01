pub mod create;
pub mod delete;
pub mod graduate;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::ErrorCode;
use crate::models::batches::entities::Batch;
use crate::models::batches::requests::{BatchQueryParams, CreateBatchRequest, UpdateBatchRequest};
use crate::models::users::entities::User;
use crate::services::access::{Access, ensure_record_access, internal_error, not_found};
use crate::storage::Storage;

pub struct BatchService {
    storage: Option<Arc<dyn Storage>>,
}

impl BatchService {
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

    /// 读取届别，写操作要求院系范围
    pub(crate) async fn load_for_write(
        &self,
        request: &HttpRequest,
        user: &User,
        batch_id: i64,
    ) -> Access<Batch> {
        let batch = match self.get_storage(request).get_batch_by_id(batch_id).await {
            Ok(Some(batch)) => batch,
            Ok(None) => return Err(not_found(ErrorCode::BatchNotFound, "Batch not found")),
            Err(e) => return Err(internal_error("Failed to get batch", e)),
        };
        ensure_record_access(user, batch.college_id, Some(batch.department_id))?;
        Ok(batch)
    }

    pub async fn list_batches(
        &self,
        request: &HttpRequest,
        query: BatchQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_batches(self, request, query).await
    }

    pub async fn create_batch(
        &self,
        request: &HttpRequest,
        batch: CreateBatchRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_batch(self, request, batch).await
    }

    pub async fn update_batch(
        &self,
        request: &HttpRequest,
        batch_id: i64,
        update: UpdateBatchRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_batch(self, request, batch_id, update).await
    }

    pub async fn delete_batch(
        &self,
        request: &HttpRequest,
        batch_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_batch(self, request, batch_id).await
    }

    // 届别毕业：在读学生转为已毕业，账号转为校友
    pub async fn graduate_batch(
        &self,
        request: &HttpRequest,
        batch_id: i64,
    ) -> ActixResult<HttpResponse> {
        graduate::graduate_batch(self, request, batch_id).await
    }
}
