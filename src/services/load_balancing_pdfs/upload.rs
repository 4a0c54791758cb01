use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use uuid::Uuid;

use super::{LoadBalancingPdfService, stored_path};
use crate::config::AppConfig;
use crate::errors::CollegeAdminError;
use crate::models::load_balancing_pdfs::requests::CreateLoadBalancingPdf;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{
    bad_request, current_user, ensure_record_access, internal_error, not_found,
};
use crate::utils::extractor::parse_positive_i64;
use crate::utils::validate_magic_bytes;

// 文本字段最大长度
const MAX_TEXT_FIELD: usize = 1024;

/// 已写入磁盘的上传文件，未提交到数据库前出错时自动删除
struct PendingFile {
    path: PathBuf,
    committed: bool,
}

impl Drop for PendingFile {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_file(&self.path);
        }
    }
}

pub async fn upload_pdf(
    service: &LoadBalancingPdfService,
    request: &HttpRequest,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let user = respond_on_err!(current_user(request));

    let config = AppConfig::get();
    let upload_dir = &config.upload.dir;

    // 确保上传目录存在
    if !Path::new(upload_dir).exists()
        && let Err(e) = fs::create_dir_all(upload_dir)
    {
        error!("{}", CollegeAdminError::file_operation(format!("{e}")));
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                ErrorCode::FileUploadFailed,
                "Failed to create upload directory",
            )),
        );
    }

    let mut pending: Option<PendingFile> = None;
    let mut original_name = String::new();
    let mut stored_name = String::new();
    let mut file_size: i64 = 0;
    let mut title = String::new();
    let mut academic_year = String::new();
    let mut department_raw = String::new();

    while let Some(mut field) = payload.try_next().await? {
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        if name == "file" {
            if pending.is_some() {
                return Ok(bad_request(
                    ErrorCode::MultifileUploadNotAllowed,
                    "Only one file can be uploaded at a time",
                ));
            }

            original_name = field
                .content_disposition()
                .and_then(|cd| cd.get_filename())
                .map(|s| s.to_string())
                .unwrap_or_default();

            // 提取扩展名并校验
            let extension = Path::new(&original_name)
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| format!(".{}", ext.to_lowercase()))
                .unwrap_or_default();

            if !config
                .upload
                .allowed_types
                .iter()
                .any(|t| t.to_lowercase() == extension)
            {
                return Ok(bad_request(
                    ErrorCode::FileTypeNotAllowed,
                    "File type not allowed",
                ));
            }

            stored_name = format!("{}-{}.bin", chrono::Utc::now().timestamp(), Uuid::new_v4());
            let path = stored_path(&stored_name);
            let mut f = match File::create(&path) {
                Ok(file) => file,
                Err(e) => {
                    error!("{}", CollegeAdminError::file_operation(format!("{e}")));
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::<()>::error_empty(
                            ErrorCode::FileUploadFailed,
                            "Failed to create file",
                        ),
                    ));
                }
            };
            let file_guard = pending.insert(PendingFile {
                path,
                committed: false,
            });

            let mut total_size: usize = 0;
            let mut first_chunk = true;
            while let Some(chunk) = field.next().await {
                let data = chunk?;

                // 第一个 chunk 校验魔术字节
                if first_chunk {
                    first_chunk = false;
                    if !validate_magic_bytes(&data, &extension) {
                        return Ok(bad_request(
                            ErrorCode::FileTypeNotAllowed,
                            "File content does not match its extension",
                        ));
                    }
                }

                total_size += data.len();
                if total_size > config.upload.max_size {
                    return Ok(bad_request(
                        ErrorCode::FileSizeExceeded,
                        "File size exceeds the limit",
                    ));
                }
                if let Err(e) = f.write_all(&data) {
                    error!(
                        "{}",
                        CollegeAdminError::file_operation(format!(
                            "{}: {e}",
                            file_guard.path.display()
                        ))
                    );
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::<()>::error_empty(
                            ErrorCode::FileUploadFailed,
                            "Failed to write file",
                        ),
                    ));
                }
            }

            if total_size == 0 {
                return Ok(bad_request(ErrorCode::FileUploadFailed, "Uploaded file is empty"));
            }
            file_size = total_size as i64;
        } else {
            // 文本字段
            let mut value = Vec::new();
            while let Some(chunk) = field.next().await {
                let data = chunk?;
                if value.len() + data.len() > MAX_TEXT_FIELD {
                    return Ok(bad_request(
                        ErrorCode::BadRequest,
                        format!("Field '{name}' is too long"),
                    ));
                }
                value.extend_from_slice(&data);
            }
            let value = String::from_utf8_lossy(&value).trim().to_string();
            match name.as_str() {
                "title" => title = value,
                "academic_year" => academic_year = value,
                "department_id" => department_raw = value,
                _ => {}
            }
        }
    }

    let Some(mut file_guard) = pending else {
        return Ok(bad_request(
            ErrorCode::FileNotFound,
            "No file found in upload payload",
        ));
    };

    if title.is_empty() || academic_year.is_empty() {
        return Ok(bad_request(
            ErrorCode::BadRequest,
            "title and academic_year are required",
        ));
    }

    // 未指定院系时，院系限定角色使用本院系
    let department_id = match parse_positive_i64(&department_raw).or(user.department_id) {
        Some(id) => id,
        None => {
            return Ok(bad_request(ErrorCode::BadRequest, "department_id is required"));
        }
    };

    let storage = service.get_storage(request);

    let department = match storage.get_department_by_id(department_id).await {
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

    let record = CreateLoadBalancingPdf {
        college_id: department.college_id,
        department_id: department.id,
        uploaded_by: user.id,
        title,
        academic_year,
        original_name,
        stored_name,
        file_size,
    };

    match storage.create_load_balancing_pdf(record).await {
        Ok(pdf) => {
            file_guard.committed = true;
            info!(
                "Load balancing PDF {} uploaded by {} for department {}",
                pdf.id, user.username, pdf.department_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                pdf,
                "File uploaded successfully",
            )))
        }
        Err(e) => {
            error!("Failed to save file record: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::FileUploadFailed,
                    "Failed to save file record",
                )),
            )
        }
    }
}
