use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RateLimit};
use crate::models::payments::requests::{
    CreateOrderRequest, PaymentQueryParams, VerifyPaymentRequest,
};
use crate::services::PaymentService;

static PAYMENT_SERVICE: Lazy<PaymentService> = Lazy::new(PaymentService::new_lazy);

pub async fn create_order(
    req: HttpRequest,
    order: web::Json<CreateOrderRequest>,
) -> ActixResult<HttpResponse> {
    PAYMENT_SERVICE.create_order(&req, order.into_inner()).await
}

pub async fn verify_payment(
    req: HttpRequest,
    verify: web::Json<VerifyPaymentRequest>,
) -> ActixResult<HttpResponse> {
    PAYMENT_SERVICE
        .verify_payment(&req, verify.into_inner())
        .await
}

pub async fn list_payments(
    req: HttpRequest,
    query: web::Query<PaymentQueryParams>,
) -> ActixResult<HttpResponse> {
    PAYMENT_SERVICE.list_payments(&req, query.into_inner()).await
}

pub fn configure_payment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/razorpay")
            .wrap(RateLimit::payment())
            .wrap(middlewares::RequireJWT)
            .route("/order", web::post().to(create_order))
            .route("/verify-payment", web::put().to(verify_payment)),
    )
    .service(
        web::scope("/api/payments")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_payments)),
    );
}
