pub mod auth;

pub mod dashboard;

pub mod colleges;

pub mod departments;

pub mod batches;

pub mod users;

pub mod students;

pub mod grade_cards;

pub mod notifications;

pub mod load_balancing_pdfs;

pub mod payments;

use actix_web::web;

pub use auth::configure_auth_routes;
pub use batches::configure_batch_routes;
pub use colleges::configure_college_routes;
pub use dashboard::configure_dashboard_routes;
pub use departments::configure_department_routes;
pub use grade_cards::configure_grade_card_routes;
pub use load_balancing_pdfs::configure_load_balancing_pdf_routes;
pub use notifications::configure_notification_routes;
pub use payments::configure_payment_routes;
pub use students::configure_student_routes;
pub use users::configure_user_routes;

/// 注册全部 API 路由
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_auth_routes)
        .configure(configure_dashboard_routes)
        .configure(configure_college_routes)
        .configure(configure_department_routes)
        .configure(configure_batch_routes)
        .configure(configure_user_routes)
        .configure(configure_student_routes)
        .configure(configure_grade_card_routes)
        .configure(configure_notification_routes)
        .configure(configure_load_balancing_pdf_routes)
        .configure(configure_payment_routes);
}
