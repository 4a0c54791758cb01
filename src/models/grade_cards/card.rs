//! 成绩单汇总
//!
//! SGPA = Σ(学分 × 绩点) / Σ学分（按学期），CGPA 对全部课程计算，均保留两位小数。

use serde::Serialize;
use std::collections::BTreeMap;

use super::entities::GradeEntry;
use crate::models::students::entities::StudentDetail;

#[derive(Debug, Serialize)]
pub struct SemesterSummary {
    pub semester: i32,
    pub credits: i32,
    pub sgpa: f64,
    pub entries: Vec<GradeEntry>,
}

#[derive(Debug, Serialize)]
pub struct GradeCard {
    pub student: StudentDetail,
    pub semesters: Vec<SemesterSummary>,
    pub total_credits: i32,
    pub cgpa: f64,
}

impl GradeCard {
    pub fn build(student: StudentDetail, entries: Vec<GradeEntry>) -> Self {
        let cgpa = weighted_average(&entries);
        let total_credits = entries.iter().map(|e| e.credits).sum();

        let mut by_semester: BTreeMap<i32, Vec<GradeEntry>> = BTreeMap::new();
        for entry in entries {
            by_semester.entry(entry.semester).or_default().push(entry);
        }

        let semesters = by_semester
            .into_iter()
            .map(|(semester, entries)| SemesterSummary {
                semester,
                credits: entries.iter().map(|e| e.credits).sum(),
                sgpa: weighted_average(&entries),
                entries,
            })
            .collect();

        Self {
            student,
            semesters,
            total_credits,
            cgpa,
        }
    }
}

/// 学分加权平均绩点，无学分时为 0
pub fn weighted_average(entries: &[GradeEntry]) -> f64 {
    let credits: i32 = entries.iter().map(|e| e.credits).sum();
    if credits <= 0 {
        return 0.0;
    }
    let points: f64 = entries
        .iter()
        .map(|e| e.credits as f64 * e.grade_point)
        .sum();
    round2(points / credits as f64)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::grade_cards::entities::grade_letter;
    use crate::models::students::entities::{Student, StudentStatus};

    fn entry(semester: i32, code: &str, credits: i32, grade_point: f64) -> GradeEntry {
        GradeEntry {
            id: 0,
            student_id: 1,
            semester,
            subject_code: code.to_string(),
            subject_name: code.to_string(),
            credits,
            grade_point,
            grade_letter: grade_letter(grade_point).to_string(),
            created_by: 1,
            created_at: chrono::Utc::now(),
        }
    }

    fn student() -> StudentDetail {
        StudentDetail {
            student: Student {
                id: 1,
                user_id: 10,
                college_id: 1,
                department_id: 1,
                batch_id: None,
                roll_number: "CS-001".to_string(),
                status: StudentStatus::Enrolled,
                created_at: chrono::Utc::now(),
                updated_at: chrono::Utc::now(),
            },
            username: "student1".to_string(),
            email: "student1@example.com".to_string(),
            display_name: None,
        }
    }

    #[test]
    fn test_weighted_average() {
        let entries = vec![entry(1, "A", 4, 9.0), entry(1, "B", 2, 6.0)];
        // (36 + 12) / 6 = 8.0
        assert_eq!(weighted_average(&entries), 8.0);
        assert_eq!(weighted_average(&[]), 0.0);
    }

    #[test]
    fn test_grade_card_groups_semesters() {
        let entries = vec![
            entry(2, "C", 3, 7.0),
            entry(1, "A", 4, 9.0),
            entry(1, "B", 3, 8.0),
        ];
        let card = GradeCard::build(student(), entries);

        assert_eq!(card.semesters.len(), 2);
        assert_eq!(card.semesters[0].semester, 1);
        assert_eq!(card.semesters[0].credits, 7);
        // (36 + 24) / 7 = 8.571...
        assert_eq!(card.semesters[0].sgpa, 8.57);
        assert_eq!(card.semesters[1].sgpa, 7.0);
        assert_eq!(card.total_credits, 10);
        // (36 + 24 + 21) / 10 = 8.1
        assert_eq!(card.cgpa, 8.1);
    }
}
