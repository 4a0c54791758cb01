//! Razorpay 支付签名校验
//!
//! 签名 = hex(HMAC-SHA256(key_secret, "{order_id}|{payment_id}"))

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

fn signed_payload(order_id: &str, payment_id: &str, secret: &str) -> HmacSha256 {
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => unreachable!("HMAC accepts keys of any length"),
    };
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    mac
}

/// 计算小写十六进制签名
pub fn compute_signature(order_id: &str, payment_id: &str, secret: &str) -> String {
    hex::encode(
        signed_payload(order_id, payment_id, secret)
            .finalize()
            .into_bytes(),
    )
}

/// 常数时间比较签名，非十六进制输入直接判定失败
pub fn verify_payment_signature(
    order_id: &str,
    payment_id: &str,
    signature: &str,
    secret: &str,
) -> bool {
    let Ok(provided) = hex::decode(signature) else {
        return false;
    };
    signed_payload(order_id, payment_id, secret)
        .verify_slice(&provided)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_round_trip() {
        let sig = compute_signature("order_1", "pay_1", "s");
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert!(verify_payment_signature("order_1", "pay_1", &sig, "s"));
    }

    #[test]
    fn test_signature_matches_manual_hmac() {
        let mut mac = HmacSha256::new_from_slice(b"s").unwrap();
        mac.update(b"order_1|pay_1");
        let expected = hex::encode(mac.finalize().into_bytes());
        assert_eq!(compute_signature("order_1", "pay_1", "s"), expected);
    }

    #[test]
    fn test_known_signature_vector() {
        // HMAC-SHA256(key = "s", message = "order_1|pay_1")
        const EXPECTED: &str = "742a38a9b459999e738a2d54e89b9f64b144535a09efaf21054dc143460d16c7";
        assert_eq!(compute_signature("order_1", "pay_1", "s"), EXPECTED);
        assert!(verify_payment_signature("order_1", "pay_1", EXPECTED, "s"));
        assert!(!verify_payment_signature("order_1", "pay_1", &EXPECTED[..63], "s"));
    }

    #[test]
    fn test_uppercase_hex_is_accepted() {
        let sig = compute_signature("order_1", "pay_1", "s").to_uppercase();
        assert!(verify_payment_signature("order_1", "pay_1", &sig, "s"));
    }

    #[test]
    fn test_mutations_fail() {
        let sig = compute_signature("order_1", "pay_1", "s");
        assert!(!verify_payment_signature("order_2", "pay_1", &sig, "s"));
        assert!(!verify_payment_signature("order_1", "pay_2", &sig, "s"));
        assert!(!verify_payment_signature("order_1", "pay_1", &sig, "t"));

        let mut flipped = sig.clone().into_bytes();
        flipped[0] = if flipped[0] == b'0' { b'1' } else { b'0' };
        let flipped = String::from_utf8(flipped).unwrap();
        assert!(!verify_payment_signature("order_1", "pay_1", &flipped, "s"));

        assert!(!verify_payment_signature("order_1", "pay_1", &sig[..62], "s"));
    }

    #[test]
    fn test_separator_is_part_of_payload() {
        // 拼接后的载荷相同则签名相同
        let sig = compute_signature("a|b", "c", "s");
        assert!(verify_payment_signature("a", "b|c", &sig, "s"));
        assert_ne!(compute_signature("ab", "c", "s"), compute_signature("a", "bc", "s"));
    }

    #[test]
    fn test_non_hex_signature_fails() {
        assert!(!verify_payment_signature("order_1", "pay_1", "zz", "s"));
        assert!(!verify_payment_signature("order_1", "pay_1", "", "s"));
    }
}
