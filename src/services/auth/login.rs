use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{LoginRequest, LoginResponse},
};
use crate::services::access::internal_error;
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;
use crate::utils::validate_captcha;

use super::AuthService;

fn auth_failed() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::AuthFailed,
        "Username or password is incorrect",
    ))
}

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let config = service.get_config();

    // 1. 校验验证码
    if config.captcha.enabled
        && !validate_captcha(
            &login_request.captcha_answer,
            &login_request.captcha_token,
            &config.captcha.secret,
        )
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::CaptchaInvalid,
            "Captcha answer is incorrect",
        )));
    }

    let storage = service.get_storage(request);

    // 2. 用户名或邮箱查找用户
    let user = match storage
        .get_user_by_username_or_email(login_request.username.trim())
        .await
    {
        Ok(Some(user)) => user,
        Ok(None) => return Ok(auth_failed()),
        Err(e) => return Ok(internal_error("Login failed", e)),
    };

    // 3. 校验密码
    if !verify_password(&login_request.password, &user.password_hash) {
        warn!("Failed login attempt for user {}", user.username);
        return Ok(auth_failed());
    }

    if !user.is_active() {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::UserInactive,
            "User account is not active",
        )));
    }

    // 4. 更新最后登录时间
    if let Err(e) = storage.update_last_login(user.id).await {
        warn!("Failed to update last login for user {}: {}", user.id, e);
    }

    // 5. 生成令牌对，记住我延长 refresh token 有效期
    let refresh_expiry = login_request
        .remember_me
        .then(|| chrono::Duration::days(config.jwt.refresh_token_remember_me_expiry));
    let token_pair = match JwtUtils::generate_token_pair(
        user.id,
        &user.role.to_string(),
        refresh_expiry,
    ) {
        Ok(pair) => pair,
        Err(e) => return Ok(internal_error("Login failed, unable to generate token", e)),
    };

    info!("User {} logged in successfully", user.username);

    let refresh_cookie = JwtUtils::create_refresh_token_cookie(
        &token_pair.refresh_token,
        token_pair.refresh_expires_in,
    );

    Ok(HttpResponse::Ok().cookie(refresh_cookie).json(ApiResponse::success(
        LoginResponse {
            access_token: token_pair.access_token,
            expires_in: config.jwt.access_token_expiry * 60,
            user,
            created_at: chrono::Utc::now(),
        },
        "Login successful",
    )))
}
