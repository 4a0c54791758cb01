//! 届别存储操作

use super::{SeaOrmStorage, page_and_size};
use crate::entity::batches::{ActiveModel, Column, Entity as Batches};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{CollegeAdminError, Result};
use crate::models::{
    PaginationInfo,
    batches::{
        entities::Batch,
        requests::{BatchListQuery, CreateBatchRequest, UpdateBatchRequest},
        responses::BatchListResponse,
    },
    students::entities::StudentStatus,
    users::entities::UserRole,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait, sea_query::Expr,
};

impl SeaOrmStorage {
    /// 创建届别
    pub async fn create_batch_impl(&self, college_id: i64, req: CreateBatchRequest) -> Result<Batch> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            college_id: Set(college_id),
            department_id: Set(req.department_id),
            name: Set(req.name),
            start_year: Set(req.start_year),
            end_year: Set(req.end_year),
            graduated: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CollegeAdminError::database_operation(format!("创建届别失败: {e}")))?;

        Ok(result.into_batch())
    }

    /// 通过 ID 获取届别
    pub async fn get_batch_by_id_impl(&self, id: i64) -> Result<Option<Batch>> {
        let result = Batches::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CollegeAdminError::database_operation(format!("查询届别失败: {e}")))?;

        Ok(result.map(|m| m.into_batch()))
    }

    /// 分页列出届别
    pub async fn list_batches_with_pagination_impl(
        &self,
        query: BatchListQuery,
    ) -> Result<BatchListResponse> {
        let (page, size) = page_and_size(query.page, query.size);

        let mut select = Batches::find();

        if let Some(college_id) = query.college_id {
            select = select.filter(Column::CollegeId.eq(college_id));
        }

        if let Some(department_id) = query.department_id {
            select = select.filter(Column::DepartmentId.eq(department_id));
        }

        select = select.order_by_desc(Column::StartYear);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            CollegeAdminError::database_operation(format!("查询届别总数失败: {e}"))
        })?;

        let pages = paginator.num_pages().await.map_err(|e| {
            CollegeAdminError::database_operation(format!("查询届别页数失败: {e}"))
        })?;

        let batches = paginator.fetch_page(page - 1).await.map_err(|e| {
            CollegeAdminError::database_operation(format!("查询届别列表失败: {e}"))
        })?;

        Ok(BatchListResponse {
            items: batches.into_iter().map(|m| m.into_batch()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新届别信息
    pub async fn update_batch_impl(
        &self,
        id: i64,
        update: UpdateBatchRequest,
    ) -> Result<Option<Batch>> {
        if self.get_batch_by_id_impl(id).await?.is_none() {
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

        if let Some(start_year) = update.start_year {
            model.start_year = Set(start_year);
        }

        if let Some(end_year) = update.end_year {
            model.end_year = Set(end_year);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| CollegeAdminError::database_operation(format!("更新届别失败: {e}")))?;

        self.get_batch_by_id_impl(id).await
    }

    /// 删除届别（学生的 batch_id 置空）
    pub async fn delete_batch_impl(&self, id: i64) -> Result<bool> {
        let result = Batches::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| CollegeAdminError::database_operation(format!("删除届别失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 届别毕业
    ///
    /// 在同一事务中：届别标记为已毕业，在读学生转为已毕业，对应账号角色转为校友。
    pub async fn graduate_batch_impl(&self, id: i64) -> Result<Option<(Batch, u64)>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CollegeAdminError::database_operation(format!("开启事务失败: {e}")))?;

        let Some(batch) = Batches::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| CollegeAdminError::database_operation(format!("查询届别失败: {e}")))?
        else {
            return Ok(None);
        };

        let now = chrono::Utc::now().timestamp();

        let user_ids: Vec<i64> = Students::find()
            .select_only()
            .column(StudentColumn::UserId)
            .filter(StudentColumn::BatchId.eq(id))
            .filter(StudentColumn::Status.eq(StudentStatus::Enrolled.to_string()))
            .into_tuple()
            .all(&txn)
            .await
            .map_err(|e| CollegeAdminError::database_operation(format!("查询届别学生失败: {e}")))?;

        if !user_ids.is_empty() {
            Students::update_many()
                .col_expr(
                    StudentColumn::Status,
                    Expr::value(StudentStatus::Graduated.to_string()),
                )
                .col_expr(StudentColumn::UpdatedAt, Expr::value(now))
                .filter(StudentColumn::BatchId.eq(id))
                .filter(StudentColumn::Status.eq(StudentStatus::Enrolled.to_string()))
                .exec(&txn)
                .await
                .map_err(|e| {
                    CollegeAdminError::database_operation(format!("更新学生学籍失败: {e}"))
                })?;

            Users::update_many()
                .col_expr(UserColumn::Role, Expr::value(UserRole::Alumni.to_string()))
                .col_expr(UserColumn::UpdatedAt, Expr::value(now))
                .filter(UserColumn::Id.is_in(user_ids.clone()))
                .exec(&txn)
                .await
                .map_err(|e| {
                    CollegeAdminError::database_operation(format!("更新校友账号失败: {e}"))
                })?;
        }

        let mut model: ActiveModel = batch.into();
        model.graduated = Set(true);
        model.updated_at = Set(now);
        let updated = model
            .update(&txn)
            .await
            .map_err(|e| CollegeAdminError::database_operation(format!("更新届别失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| CollegeAdminError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(Some((updated.into_batch(), user_ids.len() as u64)))
    }

    /// 统计届别数量
    pub async fn count_batches_impl(
        &self,
        college_id: Option<i64>,
        department_id: Option<i64>,
    ) -> Result<u64> {
        let mut select = Batches::find();
        if let Some(college_id) = college_id {
            select = select.filter(Column::CollegeId.eq(college_id));
        }
        if let Some(department_id) = department_id {
            select = select.filter(Column::DepartmentId.eq(department_id));
        }

        select
            .count(&self.db)
            .await
            .map_err(|e| CollegeAdminError::database_operation(format!("统计届别数量失败: {e}")))
    }
}
