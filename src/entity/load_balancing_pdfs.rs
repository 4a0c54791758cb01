//! 工作量分配 PDF 实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "load_balancing_pdfs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub college_id: i64,
    pub department_id: i64,
    pub uploaded_by: i64,
    pub title: String,
    pub academic_year: String,
    pub original_name: String,
    #[sea_orm(unique)]
    pub stored_name: String,
    pub file_size: i64,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::departments::Entity",
        from = "Column::DepartmentId",
        to = "super::departments::Column::Id"
    )]
    Department,
}

impl Related<super::departments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_load_balancing_pdf(
        self,
    ) -> crate::models::load_balancing_pdfs::entities::LoadBalancingPdf {
        use chrono::{DateTime, Utc};

        crate::models::load_balancing_pdfs::entities::LoadBalancingPdf {
            id: self.id,
            college_id: self.college_id,
            department_id: self.department_id,
            uploaded_by: self.uploaded_by,
            title: self.title,
            academic_year: self.academic_year,
            original_name: self.original_name,
            stored_name: self.stored_name,
            file_size: self.file_size,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
