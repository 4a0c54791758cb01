use actix_web::{HttpResponse, Result as ActixResult};

use super::AuthService;
use crate::models::{ApiResponse, auth::CaptchaResponse};
use crate::utils::generate_captcha;

pub async fn handle_captcha(service: &AuthService) -> ActixResult<HttpResponse> {
    let captcha = generate_captcha(&service.get_config().captcha.secret);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        CaptchaResponse {
            question: captcha.question,
            token: captcha.token,
        },
        "Captcha generated",
    )))
}
