use serde::{Deserialize, Serialize};

/// 单门课程成绩
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeEntry {
    pub id: i64,
    pub student_id: i64,
    pub semester: i32,
    pub subject_code: String,
    pub subject_name: String,
    pub credits: i32,
    // 10 分制绩点
    pub grade_point: f64,
    pub grade_letter: String,
    pub created_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 10 分制绩点对应的等级
pub fn grade_letter(grade_point: f64) -> &'static str {
    match grade_point {
        gp if gp >= 9.5 => "O",
        gp if gp >= 8.5 => "A+",
        gp if gp >= 7.5 => "A",
        gp if gp >= 6.5 => "B+",
        gp if gp >= 5.5 => "B",
        gp if gp >= 4.5 => "C",
        gp if gp >= 4.0 => "P",
        _ => "F",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_letter_boundaries() {
        assert_eq!(grade_letter(10.0), "O");
        assert_eq!(grade_letter(9.5), "O");
        assert_eq!(grade_letter(9.4), "A+");
        assert_eq!(grade_letter(8.5), "A+");
        assert_eq!(grade_letter(7.5), "A");
        assert_eq!(grade_letter(6.5), "B+");
        assert_eq!(grade_letter(5.5), "B");
        assert_eq!(grade_letter(4.5), "C");
        assert_eq!(grade_letter(4.0), "P");
        assert_eq!(grade_letter(3.99), "F");
        assert_eq!(grade_letter(0.0), "F");
    }
}
