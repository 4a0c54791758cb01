//! 算术验证码
//!
//! 无服务端状态：令牌为答案的 HMAC，客户端在登录时原样带回。

use hmac::{Hmac, Mac};
use rand::Rng;
use serde::Serialize;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// 验证码题目及校验令牌
#[derive(Debug, Clone, Serialize)]
pub struct Captcha {
    pub question: String,
    pub token: String,
}

fn keyed_mac(secret: &str) -> HmacSha256 {
    // HMAC 接受任意长度的密钥
    match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => unreachable!("HMAC accepts keys of any length"),
    }
}

/// 计算答案对应的令牌
pub fn captcha_token(answer: &str, secret: &str) -> String {
    let mut mac = keyed_mac(secret);
    mac.update(answer.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// 生成一道 1..=10 两数相加的题目
pub fn generate_captcha(secret: &str) -> Captcha {
    let mut rng = rand::rng();
    let a: u32 = rng.random_range(1..=10);
    let b: u32 = rng.random_range(1..=10);

    Captcha {
        question: format!("What is {a} + {b}?"),
        token: captcha_token(&(a + b).to_string(), secret),
    }
}

/// 校验答案，答案不做任何规范化
pub fn validate_captcha(answer: &str, token: &str, secret: &str) -> bool {
    let Ok(expected) = hex::decode(token) else {
        return false;
    };
    let mut mac = keyed_mac(secret);
    mac.update(answer.as_bytes());
    mac.verify_slice(&expected).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    fn parse_question(question: &str) -> (u32, u32) {
        let body = question
            .strip_prefix("What is ")
            .and_then(|s| s.strip_suffix('?'))
            .unwrap();
        let (a, b) = body.split_once(" + ").unwrap();
        (a.parse().unwrap(), b.parse().unwrap())
    }

    #[test]
    fn test_generated_question_is_answerable() {
        for _ in 0..50 {
            let captcha = generate_captcha(SECRET);
            let (a, b) = parse_question(&captcha.question);
            assert!((1..=10).contains(&a));
            assert!((1..=10).contains(&b));
            assert!(validate_captcha(&(a + b).to_string(), &captcha.token, SECRET));
        }
    }

    #[test]
    fn test_every_operand_pair() {
        for a in 1..=10u32 {
            for b in 1..=10u32 {
                let token = captcha_token(&(a + b).to_string(), SECRET);
                assert!(validate_captcha(&(a + b).to_string(), &token, SECRET));
                assert!(!validate_captcha(&(a + b + 1).to_string(), &token, SECRET));
            }
        }
    }

    #[test]
    fn test_answer_is_not_normalised() {
        let token = captcha_token("7", SECRET);
        assert!(validate_captcha("7", &token, SECRET));
        assert!(!validate_captcha(" 7", &token, SECRET));
        assert!(!validate_captcha("7 ", &token, SECRET));
        assert!(!validate_captcha("07", &token, SECRET));
        assert!(!validate_captcha("", &token, SECRET));
    }

    #[test]
    fn test_token_depends_on_secret() {
        let token = captcha_token("12", SECRET);
        assert_ne!(token, captcha_token("12", "another-secret"));
        assert!(!validate_captcha("12", &token, "another-secret"));
    }

    #[test]
    fn test_malformed_token() {
        assert!(!validate_captcha("5", "not-hex", SECRET));
        assert!(!validate_captcha("5", "", SECRET));
        assert!(!validate_captcha("5", "abcd", SECRET));
    }
}
