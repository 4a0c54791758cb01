#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use rust_college_admin::models::colleges::entities::College;
use rust_college_admin::models::colleges::requests::CreateCollegeRequest;
use rust_college_admin::models::departments::entities::Department;
use rust_college_admin::models::departments::requests::CreateDepartmentRequest;
use rust_college_admin::models::users::entities::{User, UserRole};
use rust_college_admin::models::users::requests::CreateUserRequest;
use rust_college_admin::storage::Storage;
use rust_college_admin::storage::sea_orm_storage::SeaOrmStorage;
use rust_college_admin::utils::jwt::JwtUtils;
use rust_college_admin::utils::password::hash_password;

pub const PASSWORD: &str = "College#2024";

static NEXT_IP: AtomicU32 = AtomicU32::new(1);

/// 每次调用返回不同的客户端 IP，避免测试之间共享限流计数
pub fn unique_ip() -> String {
    let n = NEXT_IP.fetch_add(1, Ordering::Relaxed);
    format!("10.{}.{}.{}", (n >> 16) & 0xff, (n >> 8) & 0xff, n & 0xff)
}

pub async fn storage() -> Arc<dyn Storage> {
    Arc::new(SeaOrmStorage::in_memory().await.unwrap())
}

pub async fn create_user(
    storage: &Arc<dyn Storage>,
    username: &str,
    role: UserRole,
    college_id: Option<i64>,
    department_id: Option<i64>,
) -> User {
    storage
        .create_user(CreateUserRequest {
            username: username.to_string(),
            email: format!("{username}@example.edu"),
            password: hash_password(PASSWORD).unwrap(),
            role,
            display_name: Some(username.to_string()),
            college_id,
            department_id,
        })
        .await
        .unwrap()
}

pub async fn create_college(storage: &Arc<dyn Storage>, name: &str, code: &str) -> College {
    storage
        .create_college(CreateCollegeRequest {
            name: name.to_string(),
            code: code.to_string(),
            address: None,
            contact_email: None,
            contact_phone: None,
        })
        .await
        .unwrap()
}

pub async fn create_department(
    storage: &Arc<dyn Storage>,
    college_id: i64,
    name: &str,
    code: &str,
) -> Department {
    storage
        .create_department(
            college_id,
            CreateDepartmentRequest {
                college_id: Some(college_id),
                name: name.to_string(),
                code: code.to_string(),
                hod_id: None,
            },
        )
        .await
        .unwrap()
}

/// 两所学院的基础数据
pub struct Fixture {
    pub storage: Arc<dyn Storage>,
    pub sysadmin: User,
    pub college: College,
    pub department: Department,
    pub other_department: Department,
    pub college_admin: User,
    pub hod: User,
    pub teacher: User,
    pub foreign_college: College,
    pub foreign_admin: User,
}

pub async fn fixture() -> Fixture {
    let storage = storage().await;
    let sysadmin = create_user(&storage, "sysadmin", UserRole::SystemAdmin, None, None).await;

    let college = create_college(&storage, "Riverside Engineering College", "REC").await;
    let department = create_department(&storage, college.id, "Computer Science", "CSE").await;
    let other_department = create_department(&storage, college.id, "Mechanical", "MECH").await;
    let college_admin = create_user(
        &storage,
        "rec_admin",
        UserRole::CollegeAdmin,
        Some(college.id),
        None,
    )
    .await;
    let hod = create_user(
        &storage,
        "cse_hod",
        UserRole::Hod,
        Some(college.id),
        Some(department.id),
    )
    .await;
    let teacher = create_user(
        &storage,
        "cse_teacher",
        UserRole::Teacher,
        Some(college.id),
        Some(department.id),
    )
    .await;

    let foreign_college = create_college(&storage, "Hillview Arts College", "HAC").await;
    let foreign_admin = create_user(
        &storage,
        "hac_admin",
        UserRole::CollegeAdmin,
        Some(foreign_college.id),
        None,
    )
    .await;

    Fixture {
        storage,
        sysadmin,
        college,
        department,
        other_department,
        college_admin,
        hod,
        teacher,
        foreign_college,
        foreign_admin,
    }
}

/// 直接签发 access token
pub fn bearer(user: &User) -> (&'static str, String) {
    let token = JwtUtils::generate_access_token(user.id, &user.role.to_string()).unwrap();
    ("Authorization", format!("Bearer {token}"))
}

/// 解析 "What is a + b?" 并给出答案
pub fn solve_captcha(question: &str) -> String {
    let expr = question
        .trim_start_matches("What is ")
        .trim_end_matches('?');
    let (a, b) = expr.split_once(" + ").unwrap();
    (a.trim().parse::<u32>().unwrap() + b.trim().parse::<u32>().unwrap()).to_string()
}

/// 构建完整路由的测试应用
#[macro_export]
macro_rules! test_app {
    ($storage:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($storage.clone()))
                .app_data(
                    actix_web::web::JsonConfig::default()
                        .error_handler(rust_college_admin::utils::json_error_handler),
                )
                .app_data(
                    actix_web::web::QueryConfig::default()
                        .error_handler(rust_college_admin::utils::query_error_handler),
                )
                .configure(rust_college_admin::routes::configure_all_routes),
        )
        .await
    };
}
