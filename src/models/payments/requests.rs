use super::entities::PaymentStatus;
use crate::models::common::PaginationQuery;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct PaymentQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<PaymentStatus>,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub amount: i64,
    pub purpose: String,
}

/// Razorpay Checkout 回调参数
#[derive(Debug, Deserialize)]
pub struct VerifyPaymentRequest {
    #[serde(alias = "razorpay_order_id")]
    pub order_id: String,
    #[serde(alias = "razorpay_payment_id")]
    pub payment_id: String,
    #[serde(alias = "razorpay_signature")]
    pub signature: String,
}

#[derive(Debug, Clone)]
pub struct NewPayment {
    pub college_id: i64,
    pub user_id: i64,
    pub order_id: String,
    pub amount: i64,
    pub currency: String,
    pub purpose: String,
}

#[derive(Debug, Clone, Default)]
pub struct PaymentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub college_id: Option<i64>,
    pub user_id: Option<i64>,
    pub status: Option<PaymentStatus>,
}
