//! 缴费记录存储操作

use super::{SeaOrmStorage, page_and_size};
use crate::entity::payments::{ActiveModel, Column, Entity as Payments};
use crate::errors::{CollegeAdminError, Result};
use crate::models::{
    PaginationInfo,
    payments::{
        entities::{Payment, PaymentStatus},
        requests::{NewPayment, PaymentListQuery},
        responses::PaymentListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    sea_query::Expr,
};

impl SeaOrmStorage {
    /// 创建待支付订单
    pub async fn create_payment_impl(&self, req: NewPayment) -> Result<Payment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            college_id: Set(req.college_id),
            user_id: Set(req.user_id),
            order_id: Set(req.order_id),
            payment_id: Set(None),
            signature: Set(None),
            amount: Set(req.amount),
            currency: Set(req.currency),
            purpose: Set(req.purpose),
            status: Set(PaymentStatus::Created.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CollegeAdminError::database_operation(format!("创建订单失败: {e}")))?;

        Ok(result.into_payment())
    }

    pub async fn get_payment_by_order_id_impl(&self, order_id: &str) -> Result<Option<Payment>> {
        let result = Payments::find()
            .filter(Column::OrderId.eq(order_id))
            .one(&self.db)
            .await
            .map_err(|e| CollegeAdminError::database_operation(format!("查询订单失败: {e}")))?;

        Ok(result.map(|m| m.into_payment()))
    }

    /// 分页列出缴费记录
    pub async fn list_payments_with_pagination_impl(
        &self,
        query: PaymentListQuery,
    ) -> Result<PaymentListResponse> {
        let (page, size) = page_and_size(query.page, query.size);

        let mut select = Payments::find();

        if let Some(college_id) = query.college_id {
            select = select.filter(Column::CollegeId.eq(college_id));
        }

        if let Some(user_id) = query.user_id {
            select = select.filter(Column::UserId.eq(user_id));
        }

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            CollegeAdminError::database_operation(format!("查询订单总数失败: {e}"))
        })?;

        let pages = paginator.num_pages().await.map_err(|e| {
            CollegeAdminError::database_operation(format!("查询订单页数失败: {e}"))
        })?;

        let payments = paginator.fetch_page(page - 1).await.map_err(|e| {
            CollegeAdminError::database_operation(format!("查询订单列表失败: {e}"))
        })?;

        Ok(PaymentListResponse {
            items: payments.into_iter().map(|m| m.into_payment()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 记录签名校验结果
    ///
    /// 条件更新：已支付的订单不会被覆盖。订单不存在或已支付时返回 None。
    pub async fn update_payment_status_impl(
        &self,
        order_id: &str,
        status: PaymentStatus,
        payment_id: &str,
        signature: &str,
    ) -> Result<Option<Payment>> {
        let result = Payments::update_many()
            .col_expr(Column::Status, Expr::value(status.to_string()))
            .col_expr(Column::PaymentId, Expr::value(payment_id.to_string()))
            .col_expr(Column::Signature, Expr::value(signature.to_string()))
            .col_expr(Column::UpdatedAt, Expr::value(chrono::Utc::now().timestamp()))
            .filter(Column::OrderId.eq(order_id))
            .filter(Column::Status.ne(PaymentStatus::Paid.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| CollegeAdminError::database_operation(format!("更新订单状态失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get_payment_by_order_id_impl(order_id).await
    }

    pub async fn count_payments_impl(
        &self,
        user_id: i64,
        status: Option<PaymentStatus>,
    ) -> Result<u64> {
        let mut select = Payments::find().filter(Column::UserId.eq(user_id));
        if let Some(status) = status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        select
            .count(&self.db)
            .await
            .map_err(|e| CollegeAdminError::database_operation(format!("统计订单数量失败: {e}")))
    }
}
