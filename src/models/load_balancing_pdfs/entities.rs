use serde::{Deserialize, Serialize};

/// 院系工作量分配 PDF
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadBalancingPdf {
    pub id: i64,
    pub college_id: i64,
    pub department_id: i64,
    pub uploaded_by: i64,
    pub title: String,
    // 学年，如 "2024-25"
    pub academic_year: String,
    pub original_name: String,
    #[serde(skip_serializing)]
    pub stored_name: String,
    pub file_size: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
