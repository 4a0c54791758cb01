use serde::{Deserialize, Serialize};

/// API 业务错误码
///
/// 放在响应体的 `code` 字段中，0 表示成功。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    // 认证
    AuthFailed = 2000,
    CaptchaInvalid = 2001,
    PasswordPolicyViolation = 2002,
    UserInactive = 2003,

    // 用户
    UserNotFound = 3000,
    UserNameInvalid = 3001,
    UserEmailInvalid = 3002,
    UserNameAlreadyExists = 3003,
    UserEmailAlreadyExists = 3004,
    UserCreationFailed = 3005,
    UserUpdateFailed = 3006,
    UserDeleteFailed = 3007,
    CanNotDeleteCurrentUser = 3008,
    RoleNotManageable = 3009,

    // 学院 / 院系 / 届别
    CollegeNotFound = 4000,
    CollegeAlreadyExists = 4001,
    DepartmentNotFound = 4100,
    DepartmentAlreadyExists = 4101,
    HodInvalid = 4102,
    BatchNotFound = 4200,
    BatchInvalid = 4201,
    BatchAlreadyGraduated = 4202,

    // 学生与成绩
    StudentNotFound = 5000,
    StudentAlreadyExists = 5001,
    GradeEntryNotFound = 5100,
    GradeEntryInvalid = 5101,
    GradeEntryAlreadyExists = 5102,

    // 通知
    NotificationNotFound = 6000,
    NotificationNoRecipients = 6001,

    // 文件
    FileNotFound = 7000,
    FileUploadFailed = 7001,
    FileTypeNotAllowed = 7002,
    FileSizeExceeded = 7003,
    MultifileUploadNotAllowed = 7004,

    // 支付
    PaymentNotFound = 8000,
    PaymentSignatureInvalid = 8001,
    PaymentAlreadyCompleted = 8002,
    PaymentNotConfigured = 8003,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success as i32, 0);
        assert_eq!(ErrorCode::Unauthorized as i32, 1001);
        assert_eq!(ErrorCode::PaymentSignatureInvalid as i32, 8001);
    }
}
