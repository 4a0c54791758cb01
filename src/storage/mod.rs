use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 学院管理方法
    async fn create_college(&self, college: CreateCollegeRequest) -> Result<College>;
    async fn get_college_by_id(&self, id: i64) -> Result<Option<College>>;
    // 通过名称或代码查找学院（用于唯一性检查）
    async fn get_college_by_name_or_code(&self, name: &str, code: &str)
    -> Result<Option<College>>;
    async fn list_colleges_with_pagination(
        &self,
        query: CollegeListQuery,
    ) -> Result<CollegeListResponse>;
    async fn update_college(
        &self,
        id: i64,
        update: UpdateCollegeRequest,
    ) -> Result<Option<College>>;
    async fn delete_college(&self, id: i64) -> Result<bool>;
    async fn count_colleges(&self) -> Result<u64>;

    /// 院系管理方法
    async fn create_department(
        &self,
        college_id: i64,
        department: CreateDepartmentRequest,
    ) -> Result<Department>;
    async fn get_department_by_id(&self, id: i64) -> Result<Option<Department>>;
    // 学院内按代码查找院系
    async fn get_department_by_code(
        &self,
        college_id: i64,
        code: &str,
    ) -> Result<Option<Department>>;
    async fn list_departments_with_pagination(
        &self,
        query: DepartmentListQuery,
    ) -> Result<DepartmentListResponse>;
    async fn update_department(
        &self,
        id: i64,
        update: UpdateDepartmentRequest,
    ) -> Result<Option<Department>>;
    async fn delete_department(&self, id: i64) -> Result<bool>;
    async fn count_departments(&self, college_id: Option<i64>) -> Result<u64>;

    /// 届别管理方法
    async fn create_batch(&self, college_id: i64, batch: CreateBatchRequest) -> Result<Batch>;
    async fn get_batch_by_id(&self, id: i64) -> Result<Option<Batch>>;
    async fn list_batches_with_pagination(&self, query: BatchListQuery)
    -> Result<BatchListResponse>;
    async fn update_batch(&self, id: i64, update: UpdateBatchRequest) -> Result<Option<Batch>>;
    async fn delete_batch(&self, id: i64) -> Result<bool>;
    // 届别毕业：学生转为已毕业，账号转为校友。返回更新后的届别和毕业人数
    async fn graduate_batch(&self, id: i64) -> Result<Option<(Batch, u64)>>;
    async fn count_batches(&self, college_id: Option<i64>, department_id: Option<i64>)
    -> Result<u64>;

    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户数量
    async fn count_users(
        &self,
        college_id: Option<i64>,
        department_id: Option<i64>,
        role: Option<UserRole>,
    ) -> Result<u64>;
    // 通知接收人：学院内满足条件的活跃用户ID
    async fn list_active_user_ids(
        &self,
        college_id: i64,
        role: Option<UserRole>,
        department_id: Option<i64>,
    ) -> Result<Vec<i64>>;

    /// 学生管理方法
    // 在同一事务中创建账号和学籍
    async fn create_student(&self, student: NewStudent) -> Result<StudentDetail>;
    async fn get_student_by_id(&self, id: i64) -> Result<Option<StudentDetail>>;
    async fn get_student_by_user_id(&self, user_id: i64) -> Result<Option<StudentDetail>>;
    async fn get_student_by_roll_number(
        &self,
        college_id: i64,
        roll_number: &str,
    ) -> Result<Option<StudentDetail>>;
    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse>;
    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<StudentDetail>>;
    // 删除学籍及其账号
    async fn delete_student(&self, id: i64) -> Result<bool>;
    async fn count_students(
        &self,
        college_id: Option<i64>,
        department_id: Option<i64>,
    ) -> Result<u64>;

    /// 成绩管理方法
    async fn create_grade_entry(
        &self,
        entry: CreateGradeEntryRequest,
        created_by: i64,
    ) -> Result<GradeEntry>;
    async fn get_grade_entry_by_id(&self, id: i64) -> Result<Option<GradeEntry>>;
    async fn find_grade_entry(
        &self,
        student_id: i64,
        semester: i32,
        subject_code: &str,
    ) -> Result<Option<GradeEntry>>;
    async fn list_grade_entries_by_student(&self, student_id: i64) -> Result<Vec<GradeEntry>>;
    async fn delete_grade_entry(&self, id: i64) -> Result<bool>;

    /// 通知管理方法
    // 批量创建通知，返回创建数量
    async fn create_notifications(&self, notifications: Vec<CreateNotificationRequest>)
    -> Result<u64>;
    async fn get_notification_by_id(&self, id: i64) -> Result<Option<Notification>>;
    async fn list_notifications_with_pagination(
        &self,
        user_id: i64,
        query: NotificationListQuery,
    ) -> Result<NotificationListResponse>;
    async fn count_unread_notifications(&self, user_id: i64) -> Result<i64>;
    async fn mark_notification_read(&self, id: i64) -> Result<bool>;
    async fn mark_all_notifications_read(&self, user_id: i64) -> Result<i64>;
    async fn delete_notification(&self, id: i64) -> Result<bool>;

    /// 工作量分配 PDF 管理方法
    async fn create_load_balancing_pdf(
        &self,
        pdf: CreateLoadBalancingPdf,
    ) -> Result<LoadBalancingPdf>;
    async fn get_load_balancing_pdf_by_id(&self, id: i64) -> Result<Option<LoadBalancingPdf>>;
    async fn list_load_balancing_pdfs_with_pagination(
        &self,
        query: LoadBalancingPdfListQuery,
    ) -> Result<LoadBalancingPdfListResponse>;
    async fn delete_load_balancing_pdf(&self, id: i64) -> Result<bool>;
    async fn count_load_balancing_pdfs(
        &self,
        college_id: Option<i64>,
        department_id: Option<i64>,
    ) -> Result<u64>;

    /// 缴费管理方法
    async fn create_payment(&self, payment: NewPayment) -> Result<Payment>;
    async fn get_payment_by_order_id(&self, order_id: &str) -> Result<Option<Payment>>;
    async fn list_payments_with_pagination(
        &self,
        query: PaymentListQuery,
    ) -> Result<PaymentListResponse>;
    // 记录校验结果；已支付的订单不再更新，此时返回 None
    async fn update_payment_status(
        &self,
        order_id: &str,
        status: PaymentStatus,
        payment_id: &str,
        signature: &str,
    ) -> Result<Option<Payment>>;
    async fn count_payments(&self, user_id: i64, status: Option<PaymentStatus>) -> Result<u64>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
