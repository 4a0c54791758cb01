//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod batches;
mod colleges;
mod departments;
mod grade_entries;
mod load_balancing_pdfs;
mod notifications;
mod payments;
mod students;
mod users;

use crate::config::AppConfig;
use crate::errors::{CollegeAdminError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        let storage = Self::with_connection(db).await?;
        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(storage)
    }

    /// 使用已有连接创建存储实例并执行迁移
    pub async fn with_connection(db: DatabaseConnection) -> Result<Self> {
        Migrator::up(&db, None)
            .await
            .map_err(|e| CollegeAdminError::database_operation(format!("数据库迁移失败: {e}")))?;

        Ok(Self { db })
    }

    /// 内存 SQLite 存储，单连接保证所有查询看到同一个库
    pub async fn in_memory() -> Result<Self> {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1).sqlx_logging(false);

        let db = Database::connect(opt).await.map_err(|e| {
            CollegeAdminError::database_connection(format!("无法连接到内存数据库: {e}"))
        })?;

        Self::with_connection(db).await
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| CollegeAdminError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .foreign_keys(true)
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| CollegeAdminError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(2)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false);

        Database::connect(opt)
            .await
            .map_err(|e| CollegeAdminError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(CollegeAdminError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

/// 分页参数归一化：页码从 1 开始，每页 1..=100 条
pub(crate) fn page_and_size(page: Option<i64>, size: Option<i64>) -> (u64, u64) {
    (
        page.unwrap_or(1).max(1) as u64,
        size.unwrap_or(10).clamp(1, 100) as u64,
    )
}

// Storage trait 实现
use crate::models::{
    batches::{
        entities::Batch,
        requests::{BatchListQuery, CreateBatchRequest, UpdateBatchRequest},
        responses::BatchListResponse,
    },
    colleges::{
        entities::College,
        requests::{CollegeListQuery, CreateCollegeRequest, UpdateCollegeRequest},
        responses::CollegeListResponse,
    },
    departments::{
        entities::Department,
        requests::{CreateDepartmentRequest, DepartmentListQuery, UpdateDepartmentRequest},
        responses::DepartmentListResponse,
    },
    grade_cards::{entities::GradeEntry, requests::CreateGradeEntryRequest},
    load_balancing_pdfs::{
        entities::LoadBalancingPdf,
        requests::{CreateLoadBalancingPdf, LoadBalancingPdfListQuery},
        responses::LoadBalancingPdfListResponse,
    },
    notifications::{
        entities::Notification,
        requests::{CreateNotificationRequest, NotificationListQuery},
        responses::NotificationListResponse,
    },
    payments::{
        entities::{Payment, PaymentStatus},
        requests::{NewPayment, PaymentListQuery},
        responses::PaymentListResponse,
    },
    students::{
        entities::StudentDetail,
        requests::{NewStudent, StudentListQuery, UpdateStudentRequest},
        responses::StudentListResponse,
    },
    users::{
        entities::{User, UserRole},
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 学院模块
    async fn create_college(&self, college: CreateCollegeRequest) -> Result<College> {
        self.create_college_impl(college).await
    }

    async fn get_college_by_id(&self, id: i64) -> Result<Option<College>> {
        self.get_college_by_id_impl(id).await
    }

    async fn get_college_by_name_or_code(
        &self,
        name: &str,
        code: &str,
    ) -> Result<Option<College>> {
        self.get_college_by_name_or_code_impl(name, code).await
    }

    async fn list_colleges_with_pagination(
        &self,
        query: CollegeListQuery,
    ) -> Result<CollegeListResponse> {
        self.list_colleges_with_pagination_impl(query).await
    }

    async fn update_college(
        &self,
        id: i64,
        update: UpdateCollegeRequest,
    ) -> Result<Option<College>> {
        self.update_college_impl(id, update).await
    }

    async fn delete_college(&self, id: i64) -> Result<bool> {
        self.delete_college_impl(id).await
    }

    async fn count_colleges(&self) -> Result<u64> {
        self.count_colleges_impl().await
    }

    // 院系模块
    async fn create_department(
        &self,
        college_id: i64,
        department: CreateDepartmentRequest,
    ) -> Result<Department> {
        self.create_department_impl(college_id, department).await
    }

    async fn get_department_by_id(&self, id: i64) -> Result<Option<Department>> {
        self.get_department_by_id_impl(id).await
    }

    async fn get_department_by_code(
        &self,
        college_id: i64,
        code: &str,
    ) -> Result<Option<Department>> {
        self.get_department_by_code_impl(college_id, code).await
    }

    async fn list_departments_with_pagination(
        &self,
        query: DepartmentListQuery,
    ) -> Result<DepartmentListResponse> {
        self.list_departments_with_pagination_impl(query).await
    }

    async fn update_department(
        &self,
        id: i64,
        update: UpdateDepartmentRequest,
    ) -> Result<Option<Department>> {
        self.update_department_impl(id, update).await
    }

    async fn delete_department(&self, id: i64) -> Result<bool> {
        self.delete_department_impl(id).await
    }

    async fn count_departments(&self, college_id: Option<i64>) -> Result<u64> {
        self.count_departments_impl(college_id).await
    }

    // 届别模块
    async fn create_batch(&self, college_id: i64, batch: CreateBatchRequest) -> Result<Batch> {
        self.create_batch_impl(college_id, batch).await
    }

    async fn get_batch_by_id(&self, id: i64) -> Result<Option<Batch>> {
        self.get_batch_by_id_impl(id).await
    }

    async fn list_batches_with_pagination(
        &self,
        query: BatchListQuery,
    ) -> Result<BatchListResponse> {
        self.list_batches_with_pagination_impl(query).await
    }

    async fn update_batch(&self, id: i64, update: UpdateBatchRequest) -> Result<Option<Batch>> {
        self.update_batch_impl(id, update).await
    }

    async fn delete_batch(&self, id: i64) -> Result<bool> {
        self.delete_batch_impl(id).await
    }

    async fn graduate_batch(&self, id: i64) -> Result<Option<(Batch, u64)>> {
        self.graduate_batch_impl(id).await
    }

    async fn count_batches(
        &self,
        college_id: Option<i64>,
        department_id: Option<i64>,
    ) -> Result<u64> {
        self.count_batches_impl(college_id, department_id).await
    }

    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(
        &self,
        college_id: Option<i64>,
        department_id: Option<i64>,
        role: Option<UserRole>,
    ) -> Result<u64> {
        self.count_users_impl(college_id, department_id, role).await
    }

    async fn list_active_user_ids(
        &self,
        college_id: i64,
        role: Option<UserRole>,
        department_id: Option<i64>,
    ) -> Result<Vec<i64>> {
        self.list_active_user_ids_impl(college_id, role, department_id)
            .await
    }

    // 学生模块
    async fn create_student(&self, student: NewStudent) -> Result<StudentDetail> {
        self.create_student_impl(student).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<StudentDetail>> {
        self.get_student_by_id_impl(id).await
    }

    async fn get_student_by_user_id(&self, user_id: i64) -> Result<Option<StudentDetail>> {
        self.get_student_by_user_id_impl(user_id).await
    }

    async fn get_student_by_roll_number(
        &self,
        college_id: i64,
        roll_number: &str,
    ) -> Result<Option<StudentDetail>> {
        self.get_student_by_roll_number_impl(college_id, roll_number)
            .await
    }

    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        self.list_students_with_pagination_impl(query).await
    }

    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<StudentDetail>> {
        self.update_student_impl(id, update).await
    }

    async fn delete_student(&self, id: i64) -> Result<bool> {
        self.delete_student_impl(id).await
    }

    async fn count_students(
        &self,
        college_id: Option<i64>,
        department_id: Option<i64>,
    ) -> Result<u64> {
        self.count_students_impl(college_id, department_id).await
    }

    // 成绩模块
    async fn create_grade_entry(
        &self,
        entry: CreateGradeEntryRequest,
        created_by: i64,
    ) -> Result<GradeEntry> {
        self.create_grade_entry_impl(entry, created_by).await
    }

    async fn get_grade_entry_by_id(&self, id: i64) -> Result<Option<GradeEntry>> {
        self.get_grade_entry_by_id_impl(id).await
    }

    async fn find_grade_entry(
        &self,
        student_id: i64,
        semester: i32,
        subject_code: &str,
    ) -> Result<Option<GradeEntry>> {
        self.find_grade_entry_impl(student_id, semester, subject_code)
            .await
    }

    async fn list_grade_entries_by_student(&self, student_id: i64) -> Result<Vec<GradeEntry>> {
        self.list_grade_entries_by_student_impl(student_id).await
    }

    async fn delete_grade_entry(&self, id: i64) -> Result<bool> {
        self.delete_grade_entry_impl(id).await
    }

    // 通知模块
    async fn create_notifications(
        &self,
        notifications: Vec<CreateNotificationRequest>,
    ) -> Result<u64> {
        self.create_notifications_batch_impl(notifications).await
    }

    async fn get_notification_by_id(&self, id: i64) -> Result<Option<Notification>> {
        self.get_notification_by_id_impl(id).await
    }

    async fn list_notifications_with_pagination(
        &self,
        user_id: i64,
        query: NotificationListQuery,
    ) -> Result<NotificationListResponse> {
        self.list_notifications_with_pagination_impl(user_id, query)
            .await
    }

    async fn count_unread_notifications(&self, user_id: i64) -> Result<i64> {
        self.get_unread_notification_count_impl(user_id).await
    }

    async fn mark_notification_read(&self, id: i64) -> Result<bool> {
        self.mark_notification_as_read_impl(id).await
    }

    async fn mark_all_notifications_read(&self, user_id: i64) -> Result<i64> {
        self.mark_all_notifications_as_read_impl(user_id).await
    }

    async fn delete_notification(&self, id: i64) -> Result<bool> {
        self.delete_notification_impl(id).await
    }

    // 工作量分配 PDF 模块
    async fn create_load_balancing_pdf(
        &self,
        pdf: CreateLoadBalancingPdf,
    ) -> Result<LoadBalancingPdf> {
        self.create_load_balancing_pdf_impl(pdf).await
    }

    async fn get_load_balancing_pdf_by_id(&self, id: i64) -> Result<Option<LoadBalancingPdf>> {
        self.get_load_balancing_pdf_by_id_impl(id).await
    }

    async fn list_load_balancing_pdfs_with_pagination(
        &self,
        query: LoadBalancingPdfListQuery,
    ) -> Result<LoadBalancingPdfListResponse> {
        self.list_load_balancing_pdfs_with_pagination_impl(query)
            .await
    }

    async fn delete_load_balancing_pdf(&self, id: i64) -> Result<bool> {
        self.delete_load_balancing_pdf_impl(id).await
    }

    async fn count_load_balancing_pdfs(
        &self,
        college_id: Option<i64>,
        department_id: Option<i64>,
    ) -> Result<u64> {
        self.count_load_balancing_pdfs_impl(college_id, department_id)
            .await
    }

    // 缴费模块
    async fn create_payment(&self, payment: NewPayment) -> Result<Payment> {
        self.create_payment_impl(payment).await
    }

    async fn get_payment_by_order_id(&self, order_id: &str) -> Result<Option<Payment>> {
        self.get_payment_by_order_id_impl(order_id).await
    }

    async fn list_payments_with_pagination(
        &self,
        query: PaymentListQuery,
    ) -> Result<PaymentListResponse> {
        self.list_payments_with_pagination_impl(query).await
    }

    async fn update_payment_status(
        &self,
        order_id: &str,
        status: PaymentStatus,
        payment_id: &str,
        signature: &str,
    ) -> Result<Option<Payment>> {
        self.update_payment_status_impl(order_id, status, payment_id, signature)
            .await
    }

    async fn count_payments(&self, user_id: i64, status: Option<PaymentStatus>) -> Result<u64> {
        self.count_payments_impl(user_id, status).await
    }
}
