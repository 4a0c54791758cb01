//! 路径参数提取器
//!
//! 路径中的 ID 必须是正整数，否则直接返回 400 JSON 响应，不进入处理程序。

use actix_web::{
    FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError,
    http::StatusCode,
};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

fn invalid_path_param(name: &str, raw: Option<&str>) -> actix_web::Error {
    let message = match raw {
        Some(value) => format!("Invalid path parameter '{name}': {value}"),
        None => format!("Missing path parameter '{name}'"),
    };
    let response = HttpResponse::build(StatusCode::BAD_REQUEST)
        .json(ApiResponse::error_empty(ErrorCode::BadRequest, &message));
    InternalError::from_response(message, response).into()
}

/// 解析正整数路径参数
pub fn parse_positive_i64(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

macro_rules! define_safe_i64_extractor {
    ($(#[$meta:meta])* $name:ident, $param:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                let raw = req.match_info().get($param);
                ready(
                    raw.and_then(parse_positive_i64)
                        .map($name)
                        .ok_or_else(|| invalid_path_param($param, raw)),
                )
            }
        }
    };
}

define_safe_i64_extractor!(
    /// 通用 `{id}` 路径参数
    SafeIDI64,
    "id"
);
