pub mod card;
pub mod entities;
pub mod requests;

pub use card::{GradeCard, SemesterSummary};
