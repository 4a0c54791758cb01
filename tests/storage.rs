mod common;

use common::{create_department, create_user, fixture};
use rust_college_admin::models::batches::requests::CreateBatchRequest;
use rust_college_admin::models::colleges::requests::CreateCollegeRequest;
use rust_college_admin::models::notifications::requests::{
    CreateNotificationRequest, NotificationListQuery,
};
use rust_college_admin::models::payments::entities::PaymentStatus;
use rust_college_admin::models::payments::requests::{NewPayment, PaymentListQuery};
use rust_college_admin::models::students::entities::StudentStatus;
use rust_college_admin::models::students::requests::{NewStudent, StudentListQuery};
use rust_college_admin::models::users::entities::UserRole;
use rust_college_admin::models::users::requests::{UpdateUserRequest, UserListQuery};
use rust_college_admin::utils::password::hash_password;

fn new_student(
    username: &str,
    college_id: i64,
    department_id: i64,
    batch_id: Option<i64>,
    roll_number: &str,
) -> NewStudent {
    NewStudent {
        username: username.to_string(),
        email: format!("{username}@example.edu"),
        password_hash: hash_password(common::PASSWORD).unwrap(),
        display_name: None,
        college_id,
        department_id,
        batch_id,
        roll_number: roll_number.to_string(),
    }
}

#[tokio::test]
async fn test_create_student_creates_login_account() {
    let fx = fixture().await;
    let detail = fx
        .storage
        .create_student(new_student(
            "nila",
            fx.college.id,
            fx.department.id,
            None,
            "CSE-7",
        ))
        .await
        .unwrap();

    assert_eq!(detail.username, "nila");
    assert_eq!(detail.student.status, StudentStatus::Enrolled);

    let user = fx
        .storage
        .get_user_by_id(detail.student.user_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.role, UserRole::Student);
    assert_eq!(user.college_id, Some(fx.college.id));
    assert_eq!(user.department_id, Some(fx.department.id));

    let by_roll = fx
        .storage
        .get_student_by_roll_number(fx.college.id, "CSE-7")
        .await
        .unwrap();
    assert!(by_roll.is_some());
    assert!(
        fx.storage
            .get_student_by_roll_number(fx.foreign_college.id, "CSE-7")
            .await
            .unwrap()
            .is_none()
    );

    assert!(fx.storage.delete_student(detail.student.id).await.unwrap());
    assert!(
        fx.storage
            .get_user_by_id(detail.student.user_id)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_graduate_batch_moves_students_to_alumni() {
    let fx = fixture().await;
    let batch = fx
        .storage
        .create_batch(
            fx.college.id,
            CreateBatchRequest {
                department_id: fx.department.id,
                name: "CSE 2020-24".to_string(),
                start_year: 2020,
                end_year: 2024,
            },
        )
        .await
        .unwrap();

    let first = fx
        .storage
        .create_student(new_student(
            "s_one",
            fx.college.id,
            fx.department.id,
            Some(batch.id),
            "R1",
        ))
        .await
        .unwrap();
    fx.storage
        .create_student(new_student(
            "s_two",
            fx.college.id,
            fx.department.id,
            Some(batch.id),
            "R2",
        ))
        .await
        .unwrap();
    // 不在该届别的学生不受影响
    let outsider = fx
        .storage
        .create_student(new_student(
            "s_three",
            fx.college.id,
            fx.department.id,
            None,
            "R3",
        ))
        .await
        .unwrap();

    let (graduated, count) = fx.storage.graduate_batch(batch.id).await.unwrap().unwrap();
    assert_eq!(count, 2);
    assert!(graduated.graduated);

    let first = fx
        .storage
        .get_student_by_id(first.student.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first.student.status, StudentStatus::Graduated);
    let first_user = fx
        .storage
        .get_user_by_id(first.student.user_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first_user.role, UserRole::Alumni);

    let outsider_user = fx
        .storage
        .get_user_by_id(outsider.student.user_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(outsider_user.role, UserRole::Student);

    let graduated_list = fx
        .storage
        .list_students_with_pagination(StudentListQuery {
            college_id: Some(fx.college.id),
            status: Some(StudentStatus::Graduated),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(graduated_list.pagination.total, 2);

    assert!(fx.storage.graduate_batch(9999).await.unwrap().is_none());
}

#[tokio::test]
async fn test_counts_and_recipients_are_tenant_scoped() {
    let fx = fixture().await;
    let student = create_user(
        &fx.storage,
        "lata",
        UserRole::Student,
        Some(fx.college.id),
        Some(fx.department.id),
    )
    .await;
    let foreign_department =
        create_department(&fx.storage, fx.foreign_college.id, "History", "HIS").await;
    create_user(
        &fx.storage,
        "foreign_student",
        UserRole::Student,
        Some(fx.foreign_college.id),
        Some(foreign_department.id),
    )
    .await;

    assert_eq!(fx.storage.count_colleges().await.unwrap(), 2);
    assert_eq!(
        fx.storage
            .count_users(Some(fx.college.id), None, Some(UserRole::Student))
            .await
            .unwrap(),
        1
    );
    assert_eq!(
        fx.storage
            .count_departments(Some(fx.foreign_college.id))
            .await
            .unwrap(),
        1
    );

    let recipients = fx
        .storage
        .list_active_user_ids(fx.college.id, Some(UserRole::Student), None)
        .await
        .unwrap();
    assert_eq!(recipients, vec![student.id]);

    let department_staff = fx
        .storage
        .list_active_user_ids(fx.college.id, None, Some(fx.department.id))
        .await
        .unwrap();
    assert!(department_staff.contains(&fx.hod.id));
    assert!(department_staff.contains(&fx.teacher.id));
    assert!(!department_staff.contains(&fx.college_admin.id));

    let listed = fx
        .storage
        .list_users_with_pagination(UserListQuery {
            college_id: Some(fx.college.id),
            search: Some("cse_".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(listed.items.len(), 2);
}

#[tokio::test]
async fn test_notifications_read_state() {
    let fx = fixture().await;
    let notifications = [fx.teacher.id, fx.teacher.id, fx.hod.id]
        .into_iter()
        .map(|user_id| CreateNotificationRequest {
            user_id,
            sender_id: Some(fx.college_admin.id),
            college_id: Some(fx.college.id),
            title: "Exam schedule".to_string(),
            content: "Published".to_string(),
        })
        .collect();
    assert_eq!(
        fx.storage
            .create_notifications(notifications)
            .await
            .unwrap(),
        3
    );

    assert_eq!(
        fx.storage
            .count_unread_notifications(fx.teacher.id)
            .await
            .unwrap(),
        2
    );
    assert_eq!(
        fx.storage
            .mark_all_notifications_read(fx.teacher.id)
            .await
            .unwrap(),
        2
    );
    assert_eq!(
        fx.storage
            .count_unread_notifications(fx.teacher.id)
            .await
            .unwrap(),
        0
    );
    assert_eq!(
        fx.storage
            .count_unread_notifications(fx.hod.id)
            .await
            .unwrap(),
        1
    );

    let unread = fx
        .storage
        .list_notifications_with_pagination(
            fx.teacher.id,
            NotificationListQuery {
                unread_only: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(unread.items.is_empty());
}

#[tokio::test]
async fn test_payment_status_updates() {
    let fx = fixture().await;
    let payment = fx
        .storage
        .create_payment(NewPayment {
            college_id: fx.college.id,
            user_id: fx.teacher.id,
            order_id: "order_ABCDEFGHIJKLMN".to_string(),
            amount: 2500,
            currency: "INR".to_string(),
            purpose: "Conference".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(payment.status, PaymentStatus::Created);

    let updated = fx
        .storage
        .update_payment_status(payment.order_id.as_str(), PaymentStatus::Paid, "pay_1", "sig")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.status, PaymentStatus::Paid);
    assert_eq!(updated.payment_id.as_deref(), Some("pay_1"));

    // 已支付的订单不能再被覆盖
    assert!(
        fx.storage
            .update_payment_status(payment.order_id.as_str(), PaymentStatus::Failed, "pay_x", "bad")
            .await
            .unwrap()
            .is_none()
    );
    let stored = fx
        .storage
        .get_payment_by_order_id(payment.order_id.as_str())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, PaymentStatus::Paid);
    assert_eq!(stored.payment_id.as_deref(), Some("pay_1"));

    assert_eq!(
        fx.storage
            .count_payments(fx.teacher.id, Some(PaymentStatus::Created))
            .await
            .unwrap(),
        0
    );

    let listed = fx
        .storage
        .list_payments_with_pagination(PaymentListQuery {
            college_id: Some(fx.foreign_college.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(listed.items.is_empty());

    assert!(
        fx.storage
            .update_payment_status("order_missing", PaymentStatus::Failed, "pay_2", "sig")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_department_change_moves_student_record() {
    let fx = fixture().await;
    let batch = fx
        .storage
        .create_batch(
            fx.college.id,
            CreateBatchRequest {
                department_id: fx.department.id,
                name: "CSE 2022-26".to_string(),
                start_year: 2022,
                end_year: 2026,
            },
        )
        .await
        .unwrap();
    let detail = fx
        .storage
        .create_student(new_student(
            "moved_student",
            fx.college.id,
            fx.department.id,
            Some(batch.id),
            "R-MOVE",
        ))
        .await
        .unwrap();

    let user = fx
        .storage
        .update_user(
            detail.student.user_id,
            UpdateUserRequest {
                email: None,
                password: None,
                status: None,
                display_name: None,
                department_id: Some(fx.other_department.id),
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.department_id, Some(fx.other_department.id));

    let student = fx
        .storage
        .get_student_by_id(detail.student.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(student.student.department_id, fx.other_department.id);
    // 旧院系的届别不再适用
    assert_eq!(student.student.batch_id, None);
}

#[tokio::test]
async fn test_unique_violation_reports_conflict() {
    let fx = fixture().await;
    // 绕过服务层的重复检查，直接由数据库约束拒绝
    let err = fx
        .storage
        .create_college(CreateCollegeRequest {
            name: "Another Riverside".to_string(),
            code: fx.college.code.clone(),
            address: None,
            contact_email: None,
            contact_phone: None,
        })
        .await
        .unwrap_err();
    assert!(err.is_conflict(), "{err}");

    let err = fx
        .storage
        .create_student(new_student(
            "cse_teacher",
            fx.college.id,
            fx.department.id,
            None,
            "R-DUP",
        ))
        .await
        .unwrap_err();
    assert!(err.is_conflict(), "{err}");
    // 事务回滚，学号未被占用
    assert!(
        fx.storage
            .get_student_by_roll_number(fx.college.id, "R-DUP")
            .await
            .unwrap()
            .is_none()
    );
}
