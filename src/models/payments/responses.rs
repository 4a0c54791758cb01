use super::entities::Payment;
use crate::models::common::PaginatedResponse;
use serde::Serialize;

pub type PaymentListResponse = PaginatedResponse<Payment>;

/// 创建订单响应，前端据此拉起 Razorpay Checkout
#[derive(Debug, Serialize)]
pub struct CreateOrderResponse {
    pub key_id: String,
    pub payment: Payment,
}
