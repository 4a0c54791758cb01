#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{Value, json};

use common::{PASSWORD, bearer, fixture, solve_captcha, unique_ip};
use rust_college_admin::models::ErrorCode;
use rust_college_admin::models::users::entities::{UserRole, UserStatus};
use rust_college_admin::models::users::requests::UpdateUserRequest;
use rust_college_admin::utils::jwt::REFRESH_TOKEN_COOKIE;

// 获取验证码并解出答案
macro_rules! fetch_captcha {
    ($app:expr, $ip:expr) => {{
        let req = test::TestRequest::get()
            .uri("/api/auth/captcha")
            .insert_header(("X-Forwarded-For", $ip))
            .to_request();
        let body: Value = test::call_and_read_body_json(&$app, req).await;
        let question = body["data"]["question"].as_str().unwrap().to_string();
        let token = body["data"]["token"].as_str().unwrap().to_string();
        (solve_captcha(&question), token)
    }};
}

#[actix_web::test]
async fn test_login_with_captcha_and_me() {
    let fx = fixture().await;
    let app = test_app!(fx.storage);
    let ip = unique_ip();

    let (answer, token) = fetch_captcha!(app, ip.as_str());
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .insert_header(("X-Forwarded-For", ip.as_str()))
        .set_json(json!({
            "username": "cse_teacher",
            "password": PASSWORD,
            "captcha_answer": answer,
            "captcha_token": token,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == REFRESH_TOKEN_COOKIE)
        .expect("refresh cookie should be set");
    assert!(!cookie.value().is_empty());
    assert_eq!(cookie.http_only(), Some(true));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["user"]["role"], "teacher");
    assert!(body["data"]["user"].get("password_hash").is_none());
    let access_token = body["data"]["access_token"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header(("Authorization", format!("Bearer {access_token}")))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["user"]["username"], "cse_teacher");
}

#[actix_web::test]
async fn test_login_rejects_wrong_captcha() {
    let fx = fixture().await;
    let app = test_app!(fx.storage);
    let ip = unique_ip();

    let (answer, token) = fetch_captcha!(app, ip.as_str());
    let wrong = (answer.parse::<u32>().unwrap() + 1).to_string();
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .insert_header(("X-Forwarded-For", ip.as_str()))
        .set_json(json!({
            "username": "cse_teacher",
            "password": PASSWORD,
            "captcha_answer": wrong,
            "captcha_token": token,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], ErrorCode::CaptchaInvalid as i32);
}

#[actix_web::test]
async fn test_login_wrong_password_and_inactive_user() {
    let fx = fixture().await;
    let app = test_app!(fx.storage);
    let ip = unique_ip();

    let (answer, token) = fetch_captcha!(app, ip.as_str());
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .insert_header(("X-Forwarded-For", ip.as_str()))
        .set_json(json!({
            "username": "cse_teacher",
            "password": "Wrong#Pass1",
            "captcha_answer": answer,
            "captcha_token": token,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    fx.storage
        .update_user(
            fx.teacher.id,
            UpdateUserRequest {
                email: None,
                password: None,
                status: Some(UserStatus::Suspended),
                display_name: None,
                department_id: None,
            },
        )
        .await
        .unwrap();

    let (answer, token) = fetch_captcha!(app, ip.as_str());
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .insert_header(("X-Forwarded-For", ip.as_str()))
        .set_json(json!({
            "username": "cse_teacher@example.edu",
            "password": PASSWORD,
            "captcha_answer": answer,
            "captcha_token": token,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], ErrorCode::UserInactive as i32);

    // 已签发的 token 也不再有效
    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header(bearer(&fx.teacher))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_refresh_token_cookie() {
    let fx = fixture().await;
    let app = test_app!(fx.storage);
    let ip = unique_ip();

    let (answer, token) = fetch_captcha!(app, ip.as_str());
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .insert_header(("X-Forwarded-For", ip.as_str()))
        .set_json(json!({
            "username": "rec_admin",
            "password": PASSWORD,
            "captcha_answer": answer,
            "captcha_token": token,
            "remember_me": true,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == REFRESH_TOKEN_COOKIE)
        .unwrap()
        .into_owned();

    let req = test::TestRequest::post()
        .uri("/api/auth/refresh")
        .insert_header(("X-Forwarded-For", ip.as_str()))
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["data"]["access_token"].as_str().is_some());

    // 没有 cookie 时拒绝
    let req = test::TestRequest::post()
        .uri("/api/auth/refresh")
        .insert_header(("X-Forwarded-For", ip.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_change_password_enforces_rules() {
    let fx = fixture().await;
    let app = test_app!(fx.storage);

    let req = test::TestRequest::put()
        .uri("/api/auth/password")
        .insert_header(bearer(&fx.hod))
        .set_json(json!({ "current_password": PASSWORD, "new_password": "short" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri("/api/auth/password")
        .insert_header(bearer(&fx.hod))
        .set_json(json!({ "current_password": "Nope#1234", "new_password": "Better#Pass9" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri("/api/auth/password")
        .insert_header(bearer(&fx.hod))
        .set_json(json!({ "current_password": PASSWORD, "new_password": "Better#Pass9" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let stored = fx
        .storage
        .get_user_by_id(fx.hod.id)
        .await
        .unwrap()
        .unwrap();
    assert!(rust_college_admin::utils::password::verify_password(
        "Better#Pass9",
        &stored.password_hash
    ));
    assert_eq!(stored.role, UserRole::Hod);
}

#[actix_web::test]
async fn test_protected_routes_require_token() {
    let fx = fixture().await;
    let app = test_app!(fx.storage);

    for uri in ["/api/dashboard", "/api/students", "/api/users", "/api/payments"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }
}
