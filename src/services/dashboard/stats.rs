use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::DashboardService;
use crate::errors::Result;
use crate::models::ApiResponse;
use crate::models::dashboard::responses::{DashboardResponse, DashboardStats};
use crate::models::grade_cards::card::weighted_average;
use crate::models::payments::entities::PaymentStatus;
use crate::models::users::entities::{User, UserRole};
use crate::services::access::{current_user, internal_error};
use crate::storage::Storage;

pub async fn get_dashboard(
    service: &DashboardService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = respond_on_err!(current_user(request));
    let storage = service.get_storage(request);

    match collect_stats(&storage, &user).await {
        Ok(stats) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            DashboardResponse {
                role: user.role,
                college_id: user.college_id,
                department_id: user.department_id,
                stats,
            },
            "Dashboard retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to collect dashboard stats", e)),
    }
}

/// 按角色收集统计数据
pub(crate) async fn collect_stats(storage: &Arc<dyn Storage>, user: &User) -> Result<DashboardStats> {
    let mut stats = DashboardStats {
        unread_notifications: storage.count_unread_notifications(user.id).await?,
        ..Default::default()
    };

    match user.role {
        UserRole::SystemAdmin => {
            stats.colleges = Some(storage.count_colleges().await?);
            stats.users = Some(storage.count_users(None, None, None).await?);
            stats.students = Some(storage.count_students(None, None).await?);
        }
        UserRole::CollegeAdmin => {
            let college_id = user.college_id;
            stats.departments = Some(storage.count_departments(college_id).await?);
            stats.teachers = Some(
                storage
                    .count_users(college_id, None, Some(UserRole::Teacher))
                    .await?,
            );
            stats.students = Some(storage.count_students(college_id, None).await?);
            stats.batches = Some(storage.count_batches(college_id, None).await?);
            stats.load_balancing_pdfs =
                Some(storage.count_load_balancing_pdfs(college_id, None).await?);
        }
        UserRole::Hod | UserRole::Teacher => {
            let (college_id, department_id) = (user.college_id, user.department_id);
            stats.teachers = Some(
                storage
                    .count_users(college_id, department_id, Some(UserRole::Teacher))
                    .await?,
            );
            stats.students = Some(storage.count_students(college_id, department_id).await?);
            stats.batches = Some(storage.count_batches(college_id, department_id).await?);
        }
        UserRole::Student | UserRole::Alumni => {
            // 没有学籍记录的账号 CGPA 为空
            if let Some(student) = storage.get_student_by_user_id(user.id).await? {
                let entries = storage
                    .list_grade_entries_by_student(student.student.id)
                    .await?;
                stats.cgpa = Some(weighted_average(&entries));
            }
            stats.pending_payments = Some(
                storage
                    .count_payments(user.id, Some(PaymentStatus::Created))
                    .await?,
            );
        }
    }

    Ok(stats)
}
