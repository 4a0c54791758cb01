//! 院系存储操作

use super::{SeaOrmStorage, page_and_size};
use crate::entity::departments::{ActiveModel, Column, Entity as Departments};
use crate::errors::{CollegeAdminError, Result};
use crate::models::{
    PaginationInfo,
    departments::{
        entities::Department,
        requests::{CreateDepartmentRequest, DepartmentListQuery, UpdateDepartmentRequest},
        responses::DepartmentListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 创建院系
    pub async fn create_department_impl(
        &self,
        college_id: i64,
        req: CreateDepartmentRequest,
    ) -> Result<Department> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            college_id: Set(college_id),
            name: Set(req.name),
            code: Set(req.code),
            hod_id: Set(req.hod_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CollegeAdminError::from_db_write("创建院系失败", e))?;

        Ok(result.into_department())
    }

    /// 通过 ID 获取院系
    pub async fn get_department_by_id_impl(&self, id: i64) -> Result<Option<Department>> {
        let result = Departments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CollegeAdminError::database_operation(format!("查询院系失败: {e}")))?;

        Ok(result.map(|m| m.into_department()))
    }

    /// 学院内按代码获取院系
    pub async fn get_department_by_code_impl(
        &self,
        college_id: i64,
        code: &str,
    ) -> Result<Option<Department>> {
        let result = Departments::find()
            .filter(Column::CollegeId.eq(college_id))
            .filter(Column::Code.eq(code))
            .one(&self.db)
            .await
            .map_err(|e| CollegeAdminError::database_operation(format!("查询院系失败: {e}")))?;

        Ok(result.map(|m| m.into_department()))
    }

    /// 分页列出院系
    pub async fn list_departments_with_pagination_impl(
        &self,
        query: DepartmentListQuery,
    ) -> Result<DepartmentListResponse> {
        let (page, size) = page_and_size(query.page, query.size);

        let mut select = Departments::find();

        if let Some(college_id) = query.college_id {
            select = select.filter(Column::CollegeId.eq(college_id));
        }

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Name.contains(&escaped))
                    .add(Column::Code.contains(&escaped)),
            );
        }

        select = select.order_by_asc(Column::Name);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            CollegeAdminError::database_operation(format!("查询院系总数失败: {e}"))
        })?;

        let pages = paginator.num_pages().await.map_err(|e| {
            CollegeAdminError::database_operation(format!("查询院系页数失败: {e}"))
        })?;

        let departments = paginator.fetch_page(page - 1).await.map_err(|e| {
            CollegeAdminError::database_operation(format!("查询院系列表失败: {e}"))
        })?;

        Ok(DepartmentListResponse {
            items: departments
                .into_iter()
                .map(|m| m.into_department())
                .collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新院系信息
    pub async fn update_department_impl(
        &self,
        id: i64,
        update: UpdateDepartmentRequest,
    ) -> Result<Option<Department>> {
        if self.get_department_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }

        if let Some(code) = update.code {
            model.code = Set(code);
        }

        if let Some(hod_id) = update.hod_id {
            model.hod_id = Set(Some(hod_id));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| CollegeAdminError::from_db_write("更新院系失败", e))?;

        self.get_department_by_id_impl(id).await
    }

    /// 删除院系
    pub async fn delete_department_impl(&self, id: i64) -> Result<bool> {
        let result = Departments::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| CollegeAdminError::database_operation(format!("删除院系失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计院系数量
    pub async fn count_departments_impl(&self, college_id: Option<i64>) -> Result<u64> {
        let mut select = Departments::find();
        if let Some(college_id) = college_id {
            select = select.filter(Column::CollegeId.eq(college_id));
        }

        select
            .count(&self.db)
            .await
            .map_err(|e| CollegeAdminError::database_operation(format!("统计院系数量失败: {e}")))
    }
}
