pub mod list;
pub mod order;
pub mod verify;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::payments::requests::{
    CreateOrderRequest, PaymentQueryParams, VerifyPaymentRequest,
};
use crate::storage::Storage;

pub struct PaymentService {
    storage: Option<Arc<dyn Storage>>,
}

impl PaymentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 本地记录订单，不调用 Razorpay 接口
    pub async fn create_order(
        &self,
        request: &HttpRequest,
        order: CreateOrderRequest,
    ) -> ActixResult<HttpResponse> {
        order::create_order(self, request, order).await
    }

    pub async fn verify_payment(
        &self,
        request: &HttpRequest,
        verify: VerifyPaymentRequest,
    ) -> ActixResult<HttpResponse> {
        verify::verify_payment(self, request, verify).await
    }

    pub async fn list_payments(
        &self,
        request: &HttpRequest,
        query: PaymentQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_payments(self, request, query).await
    }
}
