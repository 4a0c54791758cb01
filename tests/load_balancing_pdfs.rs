#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::Value;

use common::{bearer, fixture};
use rust_college_admin::models::ErrorCode;

const BOUNDARY: &str = "----collegeadminboundary";

fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((filename, content)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn content_type() -> (&'static str, String) {
    (
        "Content-Type",
        format!("multipart/form-data; boundary={BOUNDARY}"),
    )
}

#[actix_web::test]
async fn test_upload_download_delete_pdf() {
    let fx = fixture().await;
    let app = test_app!(fx.storage);
    let pdf = b"%PDF-1.7\n1 0 obj\n<<>>\nendobj\n%%EOF\n";
    let department_id = fx.department.id.to_string();

    let req = test::TestRequest::post()
        .uri("/api/loadBalancingPdf")
        .insert_header(bearer(&fx.hod))
        .insert_header(content_type())
        .set_payload(multipart_body(
            &[
                ("title", "Workload Odd Semester"),
                ("academic_year", "2024-25"),
                ("department_id", department_id.as_str()),
            ],
            Some(("workload.pdf", &pdf[..])),
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["original_name"], "workload.pdf");
    assert_eq!(body["data"]["file_size"], pdf.len());
    assert!(body["data"].get("stored_name").is_none());
    let pdf_id = body["data"]["id"].as_i64().unwrap();

    // 教师可以下载
    let req = test::TestRequest::get()
        .uri(&format!("/api/loadBalancingPdf/{pdf_id}/download"))
        .insert_header(bearer(&fx.teacher))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let disposition = resp
        .headers()
        .get("content-disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("workload.pdf"));
    let bytes = test::read_body(resp).await;
    assert_eq!(&bytes[..], &pdf[..]);

    // 其他学院不可见
    let req = test::TestRequest::get()
        .uri(&format!("/api/loadBalancingPdf/{pdf_id}/download"))
        .insert_header(bearer(&fx.foreign_admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri("/api/loadBalancingPdf?academic_year=2024-25")
        .insert_header(bearer(&fx.college_admin))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);

    // 教师不能删除
    let req = test::TestRequest::delete()
        .uri(&format!("/api/loadBalancingPdf/{pdf_id}"))
        .insert_header(bearer(&fx.teacher))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/loadBalancingPdf/{pdf_id}"))
        .insert_header(bearer(&fx.college_admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/loadBalancingPdf/{pdf_id}/download"))
        .insert_header(bearer(&fx.college_admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_upload_rejects_bad_files() {
    let fx = fixture().await;
    let app = test_app!(fx.storage);
    let department_id = fx.department.id.to_string();
    let fields = [
        ("title", "Workload"),
        ("academic_year", "2024-25"),
        ("department_id", department_id.as_str()),
    ];

    // 扩展名不允许
    let req = test::TestRequest::post()
        .uri("/api/loadBalancingPdf")
        .insert_header(bearer(&fx.college_admin))
        .insert_header(content_type())
        .set_payload(multipart_body(&fields, Some(("notes.txt", &b"plain text"[..]))))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], ErrorCode::FileTypeNotAllowed as i32);

    // 内容与扩展名不符
    let req = test::TestRequest::post()
        .uri("/api/loadBalancingPdf")
        .insert_header(bearer(&fx.college_admin))
        .insert_header(content_type())
        .set_payload(multipart_body(&fields, Some(("fake.pdf", &b"MZ\x90\x00binary"[..]))))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], ErrorCode::FileTypeNotAllowed as i32);

    // 缺少文件
    let req = test::TestRequest::post()
        .uri("/api/loadBalancingPdf")
        .insert_header(bearer(&fx.college_admin))
        .insert_header(content_type())
        .set_payload(multipart_body(&fields, None))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // 系主任不能上传到其他院系
    let other_department = fx.other_department.id.to_string();
    let req = test::TestRequest::post()
        .uri("/api/loadBalancingPdf")
        .insert_header(bearer(&fx.hod))
        .insert_header(content_type())
        .set_payload(multipart_body(
            &[
                ("title", "Workload"),
                ("academic_year", "2024-25"),
                ("department_id", other_department.as_str()),
            ],
            Some(("workload.pdf", &b"%PDF-1.4\n%%EOF\n"[..])),
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri("/api/loadBalancingPdf")
        .insert_header(bearer(&fx.college_admin))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["data"]["items"].as_array().unwrap().is_empty());
}
