pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::colleges::requests::{
    CollegeQueryParams, CreateCollegeRequest, UpdateCollegeRequest,
};
use crate::storage::Storage;

pub struct CollegeService {
    storage: Option<Arc<dyn Storage>>,
}

impl CollegeService {
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

    // 学院列表
    pub async fn list_colleges(
        &self,
        request: &HttpRequest,
        query: CollegeQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_colleges(self, request, query).await
    }

    pub async fn create_college(
        &self,
        request: &HttpRequest,
        college: CreateCollegeRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_college(self, request, college).await
    }

    pub async fn get_college(
        &self,
        request: &HttpRequest,
        college_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_college(self, request, college_id).await
    }

    pub async fn update_college(
        &self,
        request: &HttpRequest,
        college_id: i64,
        update: UpdateCollegeRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_college(self, request, college_id, update).await
    }

    // 删除学院，院系、用户等级联删除
    pub async fn delete_college(
        &self,
        request: &HttpRequest,
        college_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_college(self, request, college_id).await
    }
}
