pub mod delete;
pub mod download;
pub mod list;
pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::ErrorCode;
use crate::models::load_balancing_pdfs::entities::LoadBalancingPdf;
use crate::models::load_balancing_pdfs::requests::LoadBalancingPdfQueryParams;
use crate::models::users::entities::User;
use crate::services::access::{Access, ensure_record_access, internal_error, not_found};
use crate::storage::Storage;

pub struct LoadBalancingPdfService {
    storage: Option<Arc<dyn Storage>>,
}

impl LoadBalancingPdfService {
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

    /// 读取记录；`department_scoped` 为 true 时系主任只能操作本院系
    pub(crate) async fn load_in_scope(
        &self,
        request: &HttpRequest,
        user: &User,
        pdf_id: i64,
        department_scoped: bool,
    ) -> Access<LoadBalancingPdf> {
        let pdf = match self
            .get_storage(request)
            .get_load_balancing_pdf_by_id(pdf_id)
            .await
        {
            Ok(Some(pdf)) => pdf,
            Ok(None) => return Err(not_found(ErrorCode::FileNotFound, "File not found")),
            Err(e) => return Err(internal_error("Failed to get file record", e)),
        };
        let department_id = department_scoped.then_some(pdf.department_id);
        ensure_record_access(user, pdf.college_id, department_id)?;
        Ok(pdf)
    }

    pub async fn list_pdfs(
        &self,
        request: &HttpRequest,
        query: LoadBalancingPdfQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_pdfs(self, request, query).await
    }

    // multipart 上传：file + title + academic_year + department_id
    pub async fn upload_pdf(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        upload::upload_pdf(self, request, payload).await
    }

    pub async fn download_pdf(
        &self,
        request: &HttpRequest,
        pdf_id: i64,
    ) -> ActixResult<HttpResponse> {
        download::download_pdf(self, request, pdf_id).await
    }

    pub async fn delete_pdf(&self, request: &HttpRequest, pdf_id: i64) -> ActixResult<HttpResponse> {
        delete::delete_pdf(self, request, pdf_id).await
    }
}

/// 上传文件在磁盘上的路径
pub(crate) fn stored_path(stored_name: &str) -> PathBuf {
    PathBuf::from(&AppConfig::get().upload.dir).join(stored_name)
}
