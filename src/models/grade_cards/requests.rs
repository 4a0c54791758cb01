use crate::models::common::pagination::deserialize_optional_i64;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct GradeCardQuery {
    /// 学生、校友查询自己的成绩单时可省略
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub student_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateGradeEntryRequest {
    pub student_id: i64,
    pub semester: i32,
    pub subject_code: String,
    pub subject_name: String,
    pub credits: i32,
    pub grade_point: f64,
}

impl CreateGradeEntryRequest {
    /// 校验学期、学分和绩点范围
    pub fn validate(&self) -> Result<(), &'static str> {
        if !(1..=12).contains(&self.semester) {
            return Err("Semester must be between 1 and 12");
        }
        if !(1..=10).contains(&self.credits) {
            return Err("Credits must be between 1 and 10");
        }
        if !self.grade_point.is_finite() || !(0.0..=10.0).contains(&self.grade_point) {
            return Err("Grade point must be between 0 and 10");
        }
        if self.subject_code.trim().is_empty() || self.subject_name.trim().is_empty() {
            return Err("Subject code and name are required");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(semester: i32, credits: i32, grade_point: f64) -> CreateGradeEntryRequest {
        CreateGradeEntryRequest {
            student_id: 1,
            semester,
            subject_code: "CS101".to_string(),
            subject_name: "Programming".to_string(),
            credits,
            grade_point,
        }
    }

    #[test]
    fn test_validate_grade_entry() {
        assert!(entry(1, 4, 8.0).validate().is_ok());
        assert!(entry(0, 4, 8.0).validate().is_err());
        assert!(entry(1, 0, 8.0).validate().is_err());
        assert!(entry(1, 4, 10.5).validate().is_err());
        assert!(entry(1, 4, f64::NAN).validate().is_err());
    }
}
