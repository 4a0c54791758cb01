//! 成绩条目存储操作

use super::SeaOrmStorage;
use crate::entity::grade_entries::{ActiveModel, Column, Entity as GradeEntries};
use crate::errors::{CollegeAdminError, Result};
use crate::models::grade_cards::{entities::GradeEntry, requests::CreateGradeEntryRequest};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 录入成绩
    pub async fn create_grade_entry_impl(
        &self,
        req: CreateGradeEntryRequest,
        created_by: i64,
    ) -> Result<GradeEntry> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(req.student_id),
            semester: Set(req.semester),
            subject_code: Set(req.subject_code.trim().to_string()),
            subject_name: Set(req.subject_name.trim().to_string()),
            credits: Set(req.credits),
            grade_point: Set(req.grade_point),
            created_by: Set(created_by),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CollegeAdminError::from_db_write("录入成绩失败", e))?;

        Ok(result.into_grade_entry())
    }

    pub async fn get_grade_entry_by_id_impl(&self, id: i64) -> Result<Option<GradeEntry>> {
        let result = GradeEntries::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CollegeAdminError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(result.map(|m| m.into_grade_entry()))
    }

    /// 按学生、学期、课程代码查找成绩
    pub async fn find_grade_entry_impl(
        &self,
        student_id: i64,
        semester: i32,
        subject_code: &str,
    ) -> Result<Option<GradeEntry>> {
        let result = GradeEntries::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::Semester.eq(semester))
            .filter(Column::SubjectCode.eq(subject_code.trim()))
            .one(&self.db)
            .await
            .map_err(|e| CollegeAdminError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(result.map(|m| m.into_grade_entry()))
    }

    /// 学生全部成绩，按学期和课程代码排序
    pub async fn list_grade_entries_by_student_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<GradeEntry>> {
        let entries = GradeEntries::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_asc(Column::Semester)
            .order_by_asc(Column::SubjectCode)
            .all(&self.db)
            .await
            .map_err(|e| CollegeAdminError::database_operation(format!("查询成绩列表失败: {e}")))?;

        Ok(entries.into_iter().map(|m| m.into_grade_entry()).collect())
    }

    pub async fn delete_grade_entry_impl(&self, id: i64) -> Result<bool> {
        let result = GradeEntries::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| CollegeAdminError::database_operation(format!("删除成绩失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
