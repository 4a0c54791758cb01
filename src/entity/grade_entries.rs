//! 成绩条目实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "grade_entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub semester: i32,
    pub subject_code: String,
    pub subject_name: String,
    pub credits: i32,
    pub grade_point: f64,
    pub created_by: i64,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_grade_entry(self) -> crate::models::grade_cards::entities::GradeEntry {
        use crate::models::grade_cards::entities::{GradeEntry, grade_letter};
        use chrono::{DateTime, Utc};

        GradeEntry {
            id: self.id,
            student_id: self.student_id,
            semester: self.semester,
            subject_code: self.subject_code,
            subject_name: self.subject_name,
            credits: self.credits,
            grade_point: self.grade_point,
            grade_letter: grade_letter(self.grade_point).to_string(),
            created_by: self.created_by,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
