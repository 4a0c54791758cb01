use rand::Rng;

const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// 生成指定长度的字母数字随机串
pub fn generate_random_code(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

/// 本地订单号，格式与 Razorpay 一致：order_ + 14 位随机串
pub fn generate_order_id() -> String {
    format!("order_{}", generate_random_code(14))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_code() {
        let code = generate_random_code(8);
        assert_eq!(code.len(), 8);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_order_id() {
        let id = generate_order_id();
        assert!(id.starts_with("order_"));
        assert_eq!(id.len(), "order_".len() + 14);
        assert_ne!(generate_order_id(), generate_order_id());
    }
}
