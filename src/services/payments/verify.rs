use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::PaymentService;
use crate::config::AppConfig;
use crate::models::payments::entities::PaymentStatus;
use crate::models::payments::requests::VerifyPaymentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{
    bad_request, conflict, current_user, forbidden, internal_error, not_found,
};
use crate::utils::verify_payment_signature;

pub async fn verify_payment(
    service: &PaymentService,
    request: &HttpRequest,
    verify: VerifyPaymentRequest,
) -> ActixResult<HttpResponse> {
    let user = respond_on_err!(current_user(request));

    let order_id = verify.order_id.trim();
    let payment_id = verify.payment_id.trim();
    let signature = verify.signature.trim();
    if order_id.is_empty() || payment_id.is_empty() || signature.is_empty() {
        return Ok(bad_request(
            ErrorCode::BadRequest,
            "order_id, payment_id and signature are required",
        ));
    }

    let storage = service.get_storage(request);

    let payment = match storage.get_payment_by_order_id(order_id).await {
        Ok(Some(payment)) => payment,
        Ok(None) => return Ok(not_found(ErrorCode::PaymentNotFound, "Order not found")),
        Err(e) => return Ok(internal_error("Failed to get payment", e)),
    };

    if payment.user_id != user.id {
        return Ok(forbidden("Order belongs to another user"));
    }
    if payment.status == PaymentStatus::Paid {
        return Ok(conflict(
            ErrorCode::PaymentAlreadyCompleted,
            "Payment has already been completed",
        ));
    }

    let secret = &AppConfig::get().razorpay.key_secret;
    if secret.is_empty() {
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::PaymentNotConfigured,
                "Payment gateway is not configured",
            )),
        );
    }

    let verified = verify_payment_signature(order_id, payment_id, signature, secret);
    let status = if verified {
        PaymentStatus::Paid
    } else {
        PaymentStatus::Failed
    };

    let updated = match storage
        .update_payment_status(order_id, status, payment_id, signature)
        .await
    {
        Ok(Some(payment)) => payment,
        // 并发校验时订单可能已被另一个请求标记为已支付
        Ok(None) => {
            return Ok(match storage.get_payment_by_order_id(order_id).await {
                Ok(Some(_)) => conflict(
                    ErrorCode::PaymentAlreadyCompleted,
                    "Payment has already been completed",
                ),
                Ok(None) => not_found(ErrorCode::PaymentNotFound, "Order not found"),
                Err(e) => internal_error("Failed to get payment", e),
            });
        }
        Err(e) => return Ok(internal_error("Failed to update payment", e)),
    };

    if verified {
        info!("Payment {} verified for order {}", payment_id, order_id);
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            updated,
            "Payment verified successfully",
        )))
    } else {
        warn!("Invalid payment signature for order {}", order_id);
        Ok(HttpResponse::BadRequest().json(ApiResponse::error(
            ErrorCode::PaymentSignatureInvalid,
            updated,
            "Payment signature verification failed",
        )))
    }
}
