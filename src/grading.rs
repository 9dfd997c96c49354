//! Submission review: star grades, feedback, and summary statistics.

use serde::Serialize;
use tracing::info;

use crate::domain::Submission;
use crate::error::{AppError, AppResult};

pub const MAX_GRADE: u8 = 5;
pub const PASS_GRADE: u8 = 4;

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionStats {
    pub total: usize,
    pub average_grade: f32,
    /// Percent of submissions at or above the pass grade.
    pub pass_rate: f32,
}

pub fn passed(s: &Submission) -> bool {
    s.grade >= PASS_GRADE
}

#[derive(Debug, Default)]
pub struct SubmissionBook {
    items: Vec<Submission>,
}

impl SubmissionBook {
    pub fn new(seed: Vec<Submission>) -> Self {
        Self { items: seed }
    }

    pub fn list(&self) -> &[Submission] {
        &self.items
    }

    fn find_mut(&mut self, id: u32) -> AppResult<&mut Submission> {
        self.items
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| AppError::not_found("submission", id.to_string()))
    }

    /// Grades above the maximum are clamped.
    pub fn set_grade(&mut self, id: u32, grade: u8) -> AppResult<Submission> {
        let s = self.find_mut(id)?;
        s.grade = grade.min(MAX_GRADE);
        info!(target: "grading", id, grade = s.grade, passed = passed(s), "Grade set");
        Ok(s.clone())
    }

    pub fn set_feedback(&mut self, id: u32, feedback: String) -> AppResult<Submission> {
        let s = self.find_mut(id)?;
        s.feedback = feedback;
        Ok(s.clone())
    }

    pub fn stats(&self) -> SubmissionStats {
        let total = self.items.len();
        if total == 0 {
            return SubmissionStats { total, average_grade: 0.0, pass_rate: 0.0 };
        }
        let sum: u32 = self.items.iter().map(|s| s.grade as u32).sum();
        let passing = self.items.iter().filter(|s| passed(s)).count();
        SubmissionStats {
            total,
            average_grade: sum as f32 / total as f32,
            pass_rate: passing as f32 / total as f32 * 100.0,
        }
    }
}
