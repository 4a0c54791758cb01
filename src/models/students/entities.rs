use serde::{Deserialize, Serialize};

// 学籍状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StudentStatus {
    Enrolled,  // 在读
    Graduated, // 已毕业
    Dropped,   // 退学
}

impl std::fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StudentStatus::Enrolled => write!(f, "enrolled"),
            StudentStatus::Graduated => write!(f, "graduated"),
            StudentStatus::Dropped => write!(f, "dropped"),
        }
    }
}

impl std::str::FromStr for StudentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "enrolled" => Ok(StudentStatus::Enrolled),
            "graduated" => Ok(StudentStatus::Graduated),
            "dropped" => Ok(StudentStatus::Dropped),
            _ => Err(format!("Invalid student status: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub user_id: i64,
    pub college_id: i64,
    pub department_id: i64,
    pub batch_id: Option<i64>,
    pub roll_number: String,
    pub status: StudentStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 学生详情（附带登录账号信息）
#[derive(Debug, Clone, Serialize)]
pub struct StudentDetail {
    #[serde(flatten)]
    pub student: Student,
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
}
