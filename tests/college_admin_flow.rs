#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{Value, json};

use common::{PASSWORD, bearer, fixture};
use rust_college_admin::models::ErrorCode;
use rust_college_admin::models::users::entities::UserRole;

#[actix_web::test]
async fn test_college_writes_are_system_admin_only() {
    let fx = fixture().await;
    let app = test_app!(fx.storage);

    let req = test::TestRequest::post()
        .uri("/api/college")
        .insert_header(bearer(&fx.sysadmin))
        .set_json(json!({ "name": "Lakeside Science College", "code": " lsc " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["code"], "LSC");

    // 代码重复
    let req = test::TestRequest::post()
        .uri("/api/college")
        .insert_header(bearer(&fx.sysadmin))
        .set_json(json!({ "name": "Another College", "code": "LSC" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::post()
        .uri("/api/college")
        .insert_header(bearer(&fx.college_admin))
        .set_json(json!({ "name": "Rogue College", "code": "RGC" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // 学院管理员只能看到本学院
    let req = test::TestRequest::get()
        .uri("/api/college")
        .insert_header(bearer(&fx.college_admin))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], fx.college.id);

    let req = test::TestRequest::get()
        .uri(&format!("/api/college/{}", fx.foreign_college.id))
        .insert_header(bearer(&fx.college_admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_invalid_path_id_is_rejected() {
    let fx = fixture().await;
    let app = test_app!(fx.storage);

    for uri in ["/api/college/abc", "/api/college/0", "/api/college/-3"] {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header(bearer(&fx.sysadmin))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[actix_web::test]
async fn test_department_hod_assignment() {
    let fx = fixture().await;
    let app = test_app!(fx.storage);

    let req = test::TestRequest::post()
        .uri("/api/department")
        .insert_header(bearer(&fx.college_admin))
        .set_json(json!({ "name": "Electronics", "code": "ece" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let department_id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["college_id"], fx.college.id);

    // 教师不能被指定为系主任
    let req = test::TestRequest::put()
        .uri(&format!("/api/department/specificDepartment?id={department_id}"))
        .insert_header(bearer(&fx.college_admin))
        .set_json(json!({ "hod_id": fx.teacher.id }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], ErrorCode::HodInvalid as i32);

    let req = test::TestRequest::put()
        .uri(&format!("/api/department/specificDepartment?id={department_id}"))
        .insert_header(bearer(&fx.college_admin))
        .set_json(json!({ "hod_id": fx.hod.id }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/department/specificDepartment?id={department_id}"))
        .insert_header(bearer(&fx.teacher))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["hod_id"], fx.hod.id);

    // 其他学院的管理员无权访问
    let req = test::TestRequest::delete()
        .uri(&format!("/api/department/specificDepartment?id={department_id}"))
        .insert_header(bearer(&fx.foreign_admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // 系主任不能创建院系
    let req = test::TestRequest::post()
        .uri("/api/department")
        .insert_header(bearer(&fx.hod))
        .set_json(json!({ "name": "Civil", "code": "CIV" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_user_management_rules() {
    let fx = fixture().await;
    let app = test_app!(fx.storage);

    let req = test::TestRequest::post()
        .uri("/api/users")
        .insert_header(bearer(&fx.hod))
        .set_json(json!({
            "username": "new_teacher",
            "email": "new_teacher@example.edu",
            "password": PASSWORD,
            "role": "teacher",
            "department_id": fx.department.id,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["user"]["college_id"], fx.college.id);
    let new_teacher_id = body["data"]["user"]["id"].as_i64().unwrap();

    // 系主任不能创建系主任
    let req = test::TestRequest::post()
        .uri("/api/users")
        .insert_header(bearer(&fx.hod))
        .set_json(json!({
            "username": "another_hod",
            "email": "another_hod@example.edu",
            "password": PASSWORD,
            "role": "hod",
            "department_id": fx.department.id,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // 系主任不能在其他院系创建账号
    let req = test::TestRequest::post()
        .uri("/api/users")
        .insert_header(bearer(&fx.hod))
        .set_json(json!({
            "username": "mech_teacher",
            "email": "mech_teacher@example.edu",
            "password": PASSWORD,
            "role": "teacher",
            "department_id": fx.other_department.id,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // 弱密码
    let req = test::TestRequest::post()
        .uri("/api/users")
        .insert_header(bearer(&fx.college_admin))
        .set_json(json!({
            "username": "weak_user",
            "email": "weak_user@example.edu",
            "password": "password",
            "role": "teacher",
            "department_id": fx.department.id,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // 用户名重复
    let req = test::TestRequest::post()
        .uri("/api/users")
        .insert_header(bearer(&fx.college_admin))
        .set_json(json!({
            "username": "cse_teacher",
            "email": "dup@example.edu",
            "password": PASSWORD,
            "role": "teacher",
            "department_id": fx.department.id,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // 不能删除自己
    let req = test::TestRequest::delete()
        .uri(&format!("/api/users/{}", fx.college_admin.id))
        .insert_header(bearer(&fx.college_admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // 跨学院不可见
    let req = test::TestRequest::get()
        .uri(&format!("/api/users/{new_teacher_id}"))
        .insert_header(bearer(&fx.foreign_admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // 教师无权访问用户管理
    let req = test::TestRequest::get()
        .uri("/api/users")
        .insert_header(bearer(&fx.teacher))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/users/{new_teacher_id}"))
        .insert_header(bearer(&fx.college_admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/users?role=teacher")
        .insert_header(bearer(&fx.college_admin))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["username"], "cse_teacher");
}

#[actix_web::test]
async fn test_student_lifecycle_and_grade_card() {
    let fx = fixture().await;
    let app = test_app!(fx.storage);

    let req = test::TestRequest::post()
        .uri("/api/batch")
        .insert_header(bearer(&fx.hod))
        .set_json(json!({
            "department_id": fx.department.id,
            "name": "CSE 2021-25",
            "start_year": 2021,
            "end_year": 2025,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let batch_id = body["data"]["id"].as_i64().unwrap();

    // 改名时同样去掉首尾空白
    let req = test::TestRequest::put()
        .uri(&format!("/api/batch/{batch_id}"))
        .insert_header(bearer(&fx.hod))
        .set_json(json!({ "name": "  CSE 2021-25 A  " }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["name"], "CSE 2021-25 A");

    let req = test::TestRequest::put()
        .uri(&format!("/api/batch/{batch_id}"))
        .insert_header(bearer(&fx.hod))
        .set_json(json!({ "name": "   " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // 系主任不能在其他院系建届别
    let req = test::TestRequest::post()
        .uri("/api/batch")
        .insert_header(bearer(&fx.hod))
        .set_json(json!({
            "department_id": fx.other_department.id,
            "name": "MECH 2021-25",
            "start_year": 2021,
            "end_year": 2025,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/api/students")
        .insert_header(bearer(&fx.hod))
        .set_json(json!({
            "username": "asha_k",
            "email": "asha_k@example.edu",
            "password": PASSWORD,
            "display_name": "Asha",
            "department_id": fx.department.id,
            "batch_id": batch_id,
            "roll_number": "cse21-001",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["roll_number"], "CSE21-001");
    let student_id = body["data"]["id"].as_i64().unwrap();
    let student_user_id = body["data"]["user_id"].as_i64().unwrap();

    // 同学院学号重复
    let req = test::TestRequest::post()
        .uri("/api/students")
        .insert_header(bearer(&fx.college_admin))
        .set_json(json!({
            "username": "ravi_m",
            "email": "ravi_m@example.edu",
            "password": PASSWORD,
            "department_id": fx.department.id,
            "roll_number": "CSE21-001",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // 教师可以查看但不能创建学生
    let req = test::TestRequest::post()
        .uri("/api/students")
        .insert_header(bearer(&fx.teacher))
        .set_json(json!({
            "username": "ravi_m",
            "email": "ravi_m@example.edu",
            "password": PASSWORD,
            "department_id": fx.department.id,
            "roll_number": "CSE21-002",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri(&format!("/api/students?batch_id={batch_id}"))
        .insert_header(bearer(&fx.teacher))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);

    for (code, credits, grade_point) in [("CS101", 4, 9.0), ("MA101", 3, 8.0)] {
        let req = test::TestRequest::post()
            .uri("/api/gradeCard")
            .insert_header(bearer(&fx.teacher))
            .set_json(json!({
                "student_id": student_id,
                "semester": 1,
                "subject_code": code,
                "subject_name": format!("Subject {code}"),
                "credits": credits,
                "grade_point": grade_point,
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    // 同学期同课程重复录入
    let req = test::TestRequest::post()
        .uri("/api/gradeCard")
        .insert_header(bearer(&fx.teacher))
        .set_json(json!({
            "student_id": student_id,
            "semester": 1,
            "subject_code": "cs101",
            "subject_name": "Programming",
            "credits": 4,
            "grade_point": 7.0,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let student_user = fx
        .storage
        .get_user_by_id(student_user_id)
        .await
        .unwrap()
        .unwrap();

    // 学生不带参数读取自己的成绩单：(4*9 + 3*8) / 7 = 8.57
    let req = test::TestRequest::get()
        .uri("/api/gradeCard")
        .insert_header(bearer(&student_user))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["cgpa"], 8.57);
    assert_eq!(body["data"]["total_credits"], 7);
    assert_eq!(body["data"]["semesters"][0]["entries"][0]["grade_letter"], "A+");

    let req = test::TestRequest::get()
        .uri(&format!("/api/gradeCard?student_id={}", student_id + 1))
        .insert_header(bearer(&student_user))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // 学生不能录入成绩
    let req = test::TestRequest::post()
        .uri("/api/gradeCard")
        .insert_header(bearer(&student_user))
        .set_json(json!({
            "student_id": student_id,
            "semester": 2,
            "subject_code": "PH101",
            "subject_name": "Physics",
            "credits": 3,
            "grade_point": 10.0,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri("/api/dashboard")
        .insert_header(bearer(&student_user))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["stats"]["cgpa"], 8.57);
    assert_eq!(body["data"]["stats"]["pending_payments"], 0);

    // 届别毕业后学生转为校友
    let req = test::TestRequest::post()
        .uri(&format!("/api/batch/{batch_id}/graduate"))
        .insert_header(bearer(&fx.hod))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["graduated_students"], 1);

    let alumni = fx
        .storage
        .get_user_by_id(student_user_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(alumni.role, UserRole::Alumni);

    let req = test::TestRequest::post()
        .uri(&format!("/api/batch/{batch_id}/graduate"))
        .insert_header(bearer(&fx.hod))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // 校友依然可以查看成绩单
    let req = test::TestRequest::get()
        .uri("/api/gradeCard")
        .insert_header(bearer(&alumni))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/students/{student_id}"))
        .insert_header(bearer(&fx.college_admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(
        fx.storage
            .get_user_by_id(student_user_id)
            .await
            .unwrap()
            .is_none()
    );
}

#[actix_web::test]
async fn test_notification_broadcast_and_read() {
    let fx = fixture().await;
    let app = test_app!(fx.storage);

    let student = common::create_user(
        &fx.storage,
        "meena",
        UserRole::Student,
        Some(fx.college.id),
        Some(fx.department.id),
    )
    .await;

    // 教师只能通知学生
    let req = test::TestRequest::post()
        .uri("/api/notifications")
        .insert_header(bearer(&fx.teacher))
        .set_json(json!({ "title": "Staff meeting", "content": "3pm", "target_role": "hod" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/api/notifications")
        .insert_header(bearer(&fx.teacher))
        .set_json(json!({ "title": "Lab moved", "content": "Lab 3 today" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["recipients"], 1);

    // 学生不能广播
    let req = test::TestRequest::post()
        .uri("/api/notifications")
        .insert_header(bearer(&student))
        .set_json(json!({ "title": "Hi", "content": "All" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri("/api/notifications/unread-count")
        .insert_header(bearer(&student))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["unread_count"], 1);

    let req = test::TestRequest::get()
        .uri("/api/notifications")
        .insert_header(bearer(&student))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let notification_id = body["data"]["items"][0]["id"].as_i64().unwrap();

    // 不能操作他人的通知
    let req = test::TestRequest::put()
        .uri(&format!("/api/notifications/{notification_id}/read"))
        .insert_header(bearer(&fx.teacher))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::put()
        .uri(&format!("/api/notifications/{notification_id}/read"))
        .insert_header(bearer(&student))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/notifications/unread-count")
        .insert_header(bearer(&student))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["unread_count"], 0);
}

#[actix_web::test]
async fn test_dashboard_counts_for_college_admin() {
    let fx = fixture().await;
    let app = test_app!(fx.storage);

    let req = test::TestRequest::get()
        .uri("/api/dashboard")
        .insert_header(bearer(&fx.college_admin))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let stats = &body["data"]["stats"];
    assert_eq!(stats["departments"], 2);
    assert_eq!(stats["teachers"], 1);
    assert_eq!(stats["students"], 0);
    assert_eq!(stats["unread_notifications"], 0);
    assert!(stats.get("colleges").is_none());

    let req = test::TestRequest::get()
        .uri("/api/dashboard")
        .insert_header(bearer(&fx.sysadmin))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["stats"]["colleges"], 2);
    assert_eq!(body["data"]["role"], "system_admin");
}
