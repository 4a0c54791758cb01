//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_college_admin_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum CollegeAdminError {
            $($variant(String),)*
        }

        impl CollegeAdminError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(CollegeAdminError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(CollegeAdminError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(CollegeAdminError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl CollegeAdminError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        CollegeAdminError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_college_admin_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    FileOperation("E006", "File Operation Error"),
    Validation("E007", "Validation Error"),
    Conflict("E008", "Resource Conflict"),
}

impl CollegeAdminError {
    /// 写入失败：唯一约束冲突归为 Conflict，其余为数据库操作错误
    ///
    /// 服务层先做的重复检查与写入之间存在并发窗口，由数据库约束兜底。
    pub fn from_db_write(context: &str, err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(detail)) => {
                CollegeAdminError::Conflict(format!("{context}: {detail}"))
            }
            _ => CollegeAdminError::DatabaseOperation(format!("{context}: {err}")),
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, CollegeAdminError::Conflict(_))
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for CollegeAdminError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CollegeAdminError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for CollegeAdminError {
    fn from(err: sea_orm::DbErr) -> Self {
        CollegeAdminError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for CollegeAdminError {
    fn from(err: std::io::Error) -> Self {
        CollegeAdminError::FileOperation(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CollegeAdminError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(CollegeAdminError::cache_connection("test").code(), "E001");
        assert_eq!(CollegeAdminError::database_config("test").code(), "E003");
        assert_eq!(CollegeAdminError::validation("test").code(), "E007");
        assert_eq!(CollegeAdminError::conflict("test").code(), "E008");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            CollegeAdminError::cache_connection("test").error_type(),
            "Cache Connection Error"
        );
        assert_eq!(
            CollegeAdminError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = CollegeAdminError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_db_write_without_constraint_is_operation_error() {
        let err = CollegeAdminError::from_db_write(
            "创建学院失败",
            sea_orm::DbErr::Custom("disk full".to_string()),
        );
        assert!(!err.is_conflict());
        assert_eq!(err.code(), "E005");
        assert!(err.message().starts_with("创建学院失败"));
    }

    #[test]
    fn test_db_error_conversion() {
        let err: CollegeAdminError = sea_orm::DbErr::Custom("boom".to_string()).into();
        assert_eq!(err.code(), "E005");
        assert!(err.message().contains("boom"));
    }

    #[test]
    fn test_format_simple() {
        let err = CollegeAdminError::validation("Invalid URL");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Invalid URL"));
    }
}
