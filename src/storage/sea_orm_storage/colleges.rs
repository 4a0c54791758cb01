//! 学院存储操作

use super::{SeaOrmStorage, page_and_size};
use crate::entity::colleges::{ActiveModel, Column, Entity as Colleges};
use crate::errors::{CollegeAdminError, Result};
use crate::models::{
    PaginationInfo,
    colleges::{
        entities::College,
        requests::{CollegeListQuery, CreateCollegeRequest, UpdateCollegeRequest},
        responses::CollegeListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 创建学院
    pub async fn create_college_impl(&self, req: CreateCollegeRequest) -> Result<College> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name),
            code: Set(req.code),
            address: Set(req.address),
            contact_email: Set(req.contact_email),
            contact_phone: Set(req.contact_phone),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CollegeAdminError::from_db_write("创建学院失败", e))?;

        Ok(result.into_college())
    }

    /// 通过 ID 获取学院
    pub async fn get_college_by_id_impl(&self, id: i64) -> Result<Option<College>> {
        let result = Colleges::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CollegeAdminError::database_operation(format!("查询学院失败: {e}")))?;

        Ok(result.map(|m| m.into_college()))
    }

    /// 通过名称或代码获取学院
    pub async fn get_college_by_name_or_code_impl(
        &self,
        name: &str,
        code: &str,
    ) -> Result<Option<College>> {
        let result = Colleges::find()
            .filter(
                Condition::any()
                    .add(Column::Name.eq(name))
                    .add(Column::Code.eq(code)),
            )
            .one(&self.db)
            .await
            .map_err(|e| CollegeAdminError::database_operation(format!("查询学院失败: {e}")))?;

        Ok(result.map(|m| m.into_college()))
    }

    /// 分页列出学院
    pub async fn list_colleges_with_pagination_impl(
        &self,
        query: CollegeListQuery,
    ) -> Result<CollegeListResponse> {
        let (page, size) = page_and_size(query.page, query.size);

        let mut select = Colleges::find();

        // 非系统管理员只能看到本学院
        if let Some(college_id) = query.college_id {
            select = select.filter(Column::Id.eq(college_id));
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
            CollegeAdminError::database_operation(format!("查询学院总数失败: {e}"))
        })?;

        let pages = paginator.num_pages().await.map_err(|e| {
            CollegeAdminError::database_operation(format!("查询学院页数失败: {e}"))
        })?;

        let colleges = paginator.fetch_page(page - 1).await.map_err(|e| {
            CollegeAdminError::database_operation(format!("查询学院列表失败: {e}"))
        })?;

        Ok(CollegeListResponse {
            items: colleges.into_iter().map(|m| m.into_college()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新学院信息
    pub async fn update_college_impl(
        &self,
        id: i64,
        update: UpdateCollegeRequest,
    ) -> Result<Option<College>> {
        if self.get_college_by_id_impl(id).await?.is_none() {
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

        if let Some(address) = update.address {
            model.address = Set(Some(address));
        }

        if let Some(contact_email) = update.contact_email {
            model.contact_email = Set(Some(contact_email));
        }

        if let Some(contact_phone) = update.contact_phone {
            model.contact_phone = Set(Some(contact_phone));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| CollegeAdminError::from_db_write("更新学院失败", e))?;

        self.get_college_by_id_impl(id).await
    }

    /// 删除学院（院系、用户等级联删除）
    pub async fn delete_college_impl(&self, id: i64) -> Result<bool> {
        let result = Colleges::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| CollegeAdminError::database_operation(format!("删除学院失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计学院数量
    pub async fn count_colleges_impl(&self) -> Result<u64> {
        Colleges::find()
            .count(&self.db)
            .await
            .map_err(|e| CollegeAdminError::database_operation(format!("统计学院数量失败: {e}")))
    }
}
