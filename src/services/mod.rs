/// 把 `Result<T, HttpResponse>` 中的错误响应直接返回给客户端
macro_rules! respond_on_err {
    ($expr:expr) => {
        match $expr {
            Ok(value) => value,
            Err(response) => return Ok(response),
        }
    };
}

pub mod access;
pub mod auth;
pub mod batches;
pub mod colleges;
pub mod dashboard;
pub mod departments;
pub mod grade_cards;
pub mod load_balancing_pdfs;
pub mod notifications;
pub mod payments;
pub mod students;
pub mod users;

pub use auth::AuthService;
pub use batches::BatchService;
pub use colleges::CollegeService;
pub use dashboard::DashboardService;
pub use departments::DepartmentService;
pub use grade_cards::GradeCardService;
pub use load_balancing_pdfs::LoadBalancingPdfService;
pub use notifications::NotificationService;
pub use payments::PaymentService;
pub use students::StudentService;
pub use users::UserService;
