//! 工作量分配 PDF 存储操作

use super::{SeaOrmStorage, page_and_size};
use crate::entity::load_balancing_pdfs::{ActiveModel, Column, Entity as LoadBalancingPdfs};
use crate::errors::{CollegeAdminError, Result};
use crate::models::{
    PaginationInfo,
    load_balancing_pdfs::{
        entities::LoadBalancingPdf,
        requests::{CreateLoadBalancingPdf, LoadBalancingPdfListQuery},
        responses::LoadBalancingPdfListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 记录已保存的 PDF
    pub async fn create_load_balancing_pdf_impl(
        &self,
        req: CreateLoadBalancingPdf,
    ) -> Result<LoadBalancingPdf> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            college_id: Set(req.college_id),
            department_id: Set(req.department_id),
            uploaded_by: Set(req.uploaded_by),
            title: Set(req.title),
            academic_year: Set(req.academic_year),
            original_name: Set(req.original_name),
            stored_name: Set(req.stored_name),
            file_size: Set(req.file_size),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CollegeAdminError::database_operation(format!("保存文件记录失败: {e}")))?;

        Ok(result.into_load_balancing_pdf())
    }

    pub async fn get_load_balancing_pdf_by_id_impl(
        &self,
        id: i64,
    ) -> Result<Option<LoadBalancingPdf>> {
        let result = LoadBalancingPdfs::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CollegeAdminError::database_operation(format!("查询文件记录失败: {e}")))?;

        Ok(result.map(|m| m.into_load_balancing_pdf()))
    }

    /// 分页列出 PDF
    pub async fn list_load_balancing_pdfs_with_pagination_impl(
        &self,
        query: LoadBalancingPdfListQuery,
    ) -> Result<LoadBalancingPdfListResponse> {
        let (page, size) = page_and_size(query.page, query.size);

        let mut select = LoadBalancingPdfs::find();

        if let Some(college_id) = query.college_id {
            select = select.filter(Column::CollegeId.eq(college_id));
        }

        if let Some(department_id) = query.department_id {
            select = select.filter(Column::DepartmentId.eq(department_id));
        }

        if let Some(ref academic_year) = query.academic_year
            && !academic_year.trim().is_empty()
        {
            select = select.filter(Column::AcademicYear.eq(academic_year.trim()));
        }

        select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            CollegeAdminError::database_operation(format!("查询文件总数失败: {e}"))
        })?;

        let pages = paginator.num_pages().await.map_err(|e| {
            CollegeAdminError::database_operation(format!("查询文件页数失败: {e}"))
        })?;

        let pdfs = paginator.fetch_page(page - 1).await.map_err(|e| {
            CollegeAdminError::database_operation(format!("查询文件列表失败: {e}"))
        })?;

        Ok(LoadBalancingPdfListResponse {
            items: pdfs
                .into_iter()
                .map(|m| m.into_load_balancing_pdf())
                .collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    pub async fn delete_load_balancing_pdf_impl(&self, id: i64) -> Result<bool> {
        let result = LoadBalancingPdfs::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| CollegeAdminError::database_operation(format!("删除文件记录失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_load_balancing_pdfs_impl(
        &self,
        college_id: Option<i64>,
        department_id: Option<i64>,
    ) -> Result<u64> {
        let mut select = LoadBalancingPdfs::find();
        if let Some(college_id) = college_id {
            select = select.filter(Column::CollegeId.eq(college_id));
        }
        if let Some(department_id) = department_id {
            select = select.filter(Column::DepartmentId.eq(department_id));
        }

        select
            .count(&self.db)
            .await
            .map_err(|e| CollegeAdminError::database_operation(format!("统计文件数量失败: {e}")))
    }
}
