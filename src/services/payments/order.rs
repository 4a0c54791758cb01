use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::PaymentService;
use crate::config::AppConfig;
use crate::models::payments::requests::{CreateOrderRequest, NewPayment};
use crate::models::payments::responses::CreateOrderResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{bad_request, current_user, forbidden, internal_error};
use crate::utils::random_code::generate_order_id;

// 单笔订单上限（最小货币单位）
const MAX_AMOUNT: i64 = 100_000_000;

pub async fn create_order(
    service: &PaymentService,
    request: &HttpRequest,
    order: CreateOrderRequest,
) -> ActixResult<HttpResponse> {
    let user = respond_on_err!(current_user(request));
    let Some(college_id) = user.college_id else {
        return Ok(forbidden("Only college members can create payment orders"));
    };

    let razorpay = &AppConfig::get().razorpay;
    if razorpay.key_id.is_empty() || razorpay.key_secret.is_empty() {
        error!("Razorpay credentials are not configured");
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::PaymentNotConfigured,
                "Payment gateway is not configured",
            )),
        );
    }

    if order.amount <= 0 || order.amount > MAX_AMOUNT {
        return Ok(bad_request(
            ErrorCode::BadRequest,
            "Amount must be a positive value in the smallest currency unit",
        ));
    }
    let purpose = order.purpose.trim();
    if purpose.is_empty() {
        return Ok(bad_request(ErrorCode::BadRequest, "purpose is required"));
    }

    let payment = NewPayment {
        college_id,
        user_id: user.id,
        order_id: generate_order_id(),
        amount: order.amount,
        currency: razorpay.currency.clone(),
        purpose: purpose.to_string(),
    };

    match service.get_storage(request).create_payment(payment).await {
        Ok(payment) => {
            info!(
                "Payment order {} created by {} ({} {})",
                payment.order_id, user.username, payment.amount, payment.currency
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                CreateOrderResponse {
                    key_id: razorpay.key_id.clone(),
                    payment,
                },
                "Order created successfully",
            )))
        }
        Err(e) => Ok(internal_error("Failed to create payment order", e)),
    }
}
