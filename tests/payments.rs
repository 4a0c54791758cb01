#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{Value, json};

use common::{bearer, create_user, fixture};
use rust_college_admin::config::AppConfig;
use rust_college_admin::models::ErrorCode;
use rust_college_admin::models::payments::entities::PaymentStatus;
use rust_college_admin::models::users::entities::UserRole;
use rust_college_admin::utils::payment::compute_signature;

#[actix_web::test]
async fn test_order_and_verify_payment() {
    let fx = fixture().await;
    let app = test_app!(fx.storage);
    let student = create_user(
        &fx.storage,
        "kiran",
        UserRole::Student,
        Some(fx.college.id),
        Some(fx.department.id),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/razorpay/order")
        .insert_header(bearer(&student))
        .set_json(json!({ "amount": 0, "purpose": "Semester fee" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/razorpay/order")
        .insert_header(bearer(&student))
        .set_json(json!({ "amount": 4500000, "purpose": "Semester fee" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["key_id"], AppConfig::get().razorpay.key_id);
    assert_eq!(body["data"]["payment"]["status"], "created");
    assert_eq!(body["data"]["payment"]["currency"], "INR");
    let order_id = body["data"]["payment"]["order_id"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(order_id.starts_with("order_"));

    let req = test::TestRequest::get()
        .uri("/api/dashboard")
        .insert_header(bearer(&student))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["stats"]["pending_payments"], 1);

    // 签名错误：记为 failed
    let req = test::TestRequest::put()
        .uri("/api/razorpay/verify-payment")
        .insert_header(bearer(&student))
        .set_json(json!({
            "razorpay_order_id": order_id,
            "razorpay_payment_id": "pay_TEST001",
            "razorpay_signature": "deadbeef",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], ErrorCode::PaymentSignatureInvalid as i32);
    assert_eq!(body["data"]["status"], "failed");

    // 他人不能校验
    let other = create_user(
        &fx.storage,
        "divya",
        UserRole::Student,
        Some(fx.college.id),
        Some(fx.department.id),
    )
    .await;
    let signature = compute_signature(
        &order_id,
        "pay_TEST002",
        &AppConfig::get().razorpay.key_secret,
    );
    let req = test::TestRequest::put()
        .uri("/api/razorpay/verify-payment")
        .insert_header(bearer(&other))
        .set_json(json!({
            "order_id": order_id,
            "payment_id": "pay_TEST002",
            "signature": signature,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::put()
        .uri("/api/razorpay/verify-payment")
        .insert_header(bearer(&student))
        .set_json(json!({
            "order_id": order_id,
            "payment_id": "pay_TEST002",
            "signature": signature,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], "paid");
    assert_eq!(body["data"]["payment_id"], "pay_TEST002");
    assert!(body["data"].get("signature").is_none());

    // 已支付的订单不再修改
    let req = test::TestRequest::put()
        .uri("/api/razorpay/verify-payment")
        .insert_header(bearer(&student))
        .set_json(json!({
            "order_id": order_id,
            "payment_id": "pay_TEST002",
            "signature": signature,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::put()
        .uri("/api/razorpay/verify-payment")
        .insert_header(bearer(&student))
        .set_json(json!({
            "order_id": "order_missing",
            "payment_id": "pay_TEST003",
            "signature": signature,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_payment_listing_scope() {
    let fx = fixture().await;
    let app = test_app!(fx.storage);
    let student = create_user(
        &fx.storage,
        "arjun",
        UserRole::Student,
        Some(fx.college.id),
        Some(fx.department.id),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/razorpay/order")
        .insert_header(bearer(&student))
        .set_json(json!({ "amount": 150000, "purpose": "Library fine" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    // 系统管理员不属于任何学院，不能下单
    let req = test::TestRequest::post()
        .uri("/api/razorpay/order")
        .insert_header(bearer(&fx.sysadmin))
        .set_json(json!({ "amount": 100, "purpose": "Test" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    for (user, expected) in [
        (&student, 1),
        (&fx.college_admin, 1),
        (&fx.foreign_admin, 0),
        (&fx.sysadmin, 1),
        (&fx.teacher, 0),
    ] {
        let req = test::TestRequest::get()
            .uri("/api/payments")
            .insert_header(bearer(user))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            body["data"]["items"].as_array().unwrap().len(),
            expected,
            "{}",
            user.username
        );
    }

    let req = test::TestRequest::get()
        .uri("/api/payments?status=paid")
        .insert_header(bearer(&fx.college_admin))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["data"]["items"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_concurrent_verification_keeps_paid_status() {
    let fx = fixture().await;
    let app = test_app!(fx.storage);
    let student = create_user(
        &fx.storage,
        "meera",
        UserRole::Student,
        Some(fx.college.id),
        Some(fx.department.id),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/razorpay/order")
        .insert_header(bearer(&student))
        .set_json(json!({ "amount": 250000, "purpose": "Hostel fee" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let order_id = body["data"]["payment"]["order_id"]
        .as_str()
        .unwrap()
        .to_string();

    let signature = compute_signature(
        &order_id,
        "pay_GOOD",
        &AppConfig::get().razorpay.key_secret,
    );
    let good = test::TestRequest::put()
        .uri("/api/razorpay/verify-payment")
        .insert_header(bearer(&student))
        .set_json(json!({
            "order_id": order_id,
            "payment_id": "pay_GOOD",
            "signature": signature,
        }))
        .to_request();
    let bad = test::TestRequest::put()
        .uri("/api/razorpay/verify-payment")
        .insert_header(bearer(&student))
        .set_json(json!({
            "order_id": order_id,
            "payment_id": "pay_BAD",
            "signature": "00ff",
        }))
        .to_request();

    let (good_resp, bad_resp) = futures_util::join!(
        test::call_service(&app, good),
        test::call_service(&app, bad)
    );
    assert_eq!(good_resp.status(), StatusCode::OK);
    // 先到的错误签名记为 failed，后到的则因订单已支付被拒绝
    assert!(matches!(
        bad_resp.status(),
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT
    ));

    let stored = fx
        .storage
        .get_payment_by_order_id(&order_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, PaymentStatus::Paid);
    assert_eq!(stored.payment_id.as_deref(), Some("pay_GOOD"));
}
