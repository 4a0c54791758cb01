pub mod auth;
pub mod batches;
pub mod colleges;
pub mod common;
pub mod dashboard;
pub mod departments;
pub mod grade_cards;
pub mod load_balancing_pdfs;
pub mod notifications;
pub mod payments;
pub mod students;
pub mod users;

mod error_code;

pub use common::{ApiResponse, PaginatedResponse, PaginationInfo, PaginationQuery};
pub use error_code::ErrorCode;

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
