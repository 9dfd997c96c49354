//! Quiz generator form: topic, difficulty, question count and tags.
//!
//! There is no generation backend; `generate` validates the request and logs it.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::domain::{Difficulty, QuizRequest};
use crate::error::{AppError, AppResult};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizPatch {
    pub topic: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub question_count: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAccepted {
    pub accepted: bool,
    pub request: QuizRequest,
}

impl QuizRequest {
    pub fn apply(&mut self, patch: QuizPatch) {
        if let Some(t) = patch.topic {
            self.topic = t;
        }
        if let Some(d) = patch.difficulty {
            self.difficulty = d;
        }
        if let Some(n) = patch.question_count {
            self.question_count = n;
        }
    }

    /// Returns false when the tag is blank or already present.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }

    pub fn validate(&self, max_questions: u32) -> AppResult<()> {
        if self.topic.trim().is_empty() {
            return Err(AppError::Validation("topic is required".into()));
        }
        if !(1..=max_questions).contains(&self.question_count) {
            return Err(AppError::Validation(format!(
                "questionCount must be between 1 and {max_questions}"
            )));
        }
        Ok(())
    }

    #[instrument(level = "info", skip(self), fields(topic = %self.topic))]
    pub fn generate(&self, max_questions: u32) -> AppResult<QuizAccepted> {
        self.validate(max_questions)?;
        info!(
            target: "quiz",
            topic = %self.topic,
            difficulty = ?self.difficulty,
            question_count = self.question_count,
            tags = ?self.tags,
            "Quiz generation requested"
        );
        Ok(QuizAccepted { accepted: true, request: self.clone() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_are_unique_and_non_blank() {
        let mut q = QuizRequest::default();
        assert!(q.add_tag("algebra"));
        assert!(!q.add_tag("algebra"));
        assert!(!q.add_tag("   "));
        assert!(q.add_tag(" fractions "));
        assert_eq!(q.tags, vec!["algebra", "fractions"]);
        q.remove_tag("algebra");
        assert_eq!(q.tags, vec!["fractions"]);
    }

    #[test]
    fn test_generate_requires_topic() {
        let q = QuizRequest::default();
        assert!(matches!(q.generate(20), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_generate_bounds_question_count() {
        let mut q = QuizRequest { topic: "Cells".into(), ..Default::default() };
        q.apply(QuizPatch { question_count: Some(0), ..Default::default() });
        assert!(q.generate(20).is_err());
        q.apply(QuizPatch { question_count: Some(21), ..Default::default() });
        assert!(q.generate(20).is_err());
        q.apply(QuizPatch { question_count: Some(20), difficulty: Some(Difficulty::Hard), ..Default::default() });
        let ok = q.generate(20).unwrap();
        assert!(ok.accepted);
        assert_eq!(ok.request.difficulty, Difficulty::Hard);
    }
}
