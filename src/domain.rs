//! Domain models: assessments and their questions, chat messages, submissions,
//! quiz requests, and the read-only display records behind the dashboard pages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Gradable unit of work.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AssessmentKind {
    Quiz,
    #[default]
    Assignment,
    Project,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AssessmentStatus {
    #[default]
    Draft,
    Published,
    Completed,
}

impl AssessmentStatus {
    /// Chip colour the dashboard uses for this status.
    pub fn color(&self) -> &'static str {
        match self {
            AssessmentStatus::Published => "success",
            AssessmentStatus::Draft => "warning",
            AssessmentStatus::Completed => "info",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSettings {
    pub allow_late_submission: bool,
    pub show_results: bool,
    pub randomize_questions: bool,
    pub time_limit: bool,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    #[default]
    MultipleChoice,
    TrueFalse,
    ShortAnswer,
    Essay,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum CorrectAnswer {
    One(String),
    Many(Vec<String>),
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    /// Prompt text.
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<CorrectAnswer>,
    pub points: u32,
    pub required: bool,
}

/// Assessment fields as submitted by the form (everything but the id).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_course")]
    pub course: String,
    #[serde(default = "default_duration")]
    pub duration: u32,
    #[serde(default)]
    pub due_date: String,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub settings: AssessmentSettings,
    #[serde(rename = "type", default)]
    pub kind: AssessmentKind,
    #[serde(default)]
    pub status: AssessmentStatus,
    #[serde(default = "default_course_id")]
    pub course_id: String,
}

fn default_course() -> String {
    "mathematics".into()
}
fn default_duration() -> u32 {
    60
}
fn default_course_id() -> String {
    "1".into()
}

impl Default for AssessmentForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            course: default_course(),
            duration: default_duration(),
            due_date: String::new(),
            questions: Vec::new(),
            settings: AssessmentSettings::default(),
            kind: AssessmentKind::default(),
            status: AssessmentStatus::default(),
            course_id: default_course_id(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub id: String,
    #[serde(flatten)]
    pub form: AssessmentForm,
}

/// Shallow patch: each present field replaces the stored one wholesale.
#[derive(Clone, Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub course: Option<String>,
    pub duration: Option<u32>,
    pub due_date: Option<String>,
    pub questions: Option<Vec<Question>>,
    pub settings: Option<AssessmentSettings>,
    #[serde(rename = "type")]
    pub kind: Option<AssessmentKind>,
    pub status: Option<AssessmentStatus>,
    pub course_id: Option<String>,
}

impl AssessmentPatch {
    pub fn apply_to(self, form: &mut AssessmentForm) {
        if let Some(v) = self.title {
            form.title = v;
        }
        if let Some(v) = self.description {
            form.description = v;
        }
        if let Some(v) = self.course {
            form.course = v;
        }
        if let Some(v) = self.duration {
            form.duration = v;
        }
        if let Some(v) = self.due_date {
            form.due_date = v;
        }
        if let Some(v) = self.questions {
            form.questions = v;
        }
        if let Some(v) = self.settings {
            form.settings = v;
        }
        if let Some(v) = self.kind {
            form.kind = v;
        }
        if let Some(v) = self.status {
            form.status = v;
        }
        if let Some(v) = self.course_id {
            form.course_id = v;
        }
    }
}

impl From<AssessmentForm> for AssessmentPatch {
    fn from(f: AssessmentForm) -> Self {
        Self {
            title: Some(f.title),
            description: Some(f.description),
            course: Some(f.course),
            duration: Some(f.duration),
            due_date: Some(f.due_date),
            questions: Some(f.questions),
            settings: Some(f.settings),
            kind: Some(f.kind),
            status: Some(f.status),
            course_id: Some(f.course_id),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub id: u64,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

/// A student's answer under review (grade is 0..=5 stars).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Submission {
    pub id: u32,
    pub question: String,
    pub answer: String,
    pub grade: u8,
    pub feedback: String,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuizRequest {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default = "default_question_count")]
    pub question_count: u32,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_question_count() -> u32 {
    5
}

impl Default for QuizRequest {
    fn default() -> Self {
        Self {
            topic: String::new(),
            difficulty: Difficulty::default(),
            question_count: default_question_count(),
            tags: Vec::new(),
        }
    }
}

//
// Read-only display records
//

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Video,
    Quiz,
    Assignment,
    Reading,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ContentStatus {
    Completed,
    InProgress,
    Pending,
    Locked,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleContent {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ContentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    pub status: ContentStatus,
    pub progress: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentModule {
    pub module_title: String,
    pub module_description: String,
    pub overall_progress: u8,
    pub instructor: String,
    pub last_updated: String,
    pub contents: Vec<ModuleContent>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressMetric {
    pub label: String,
    pub value: u32,
    pub target: u32,
    pub unit: String,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AchievementType {
    Achievement,
    Milestone,
    Certificate,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: AchievementType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningProgress {
    pub metrics: Vec<ProgressMetric>,
    pub achievements: Vec<Achievement>,
    pub study_time: String,
    pub completed_modules: u32,
    pub total_modules: u32,
    pub streak: u32,
    pub next_milestone: String,
}

impl LearningProgress {
    pub fn module_progress(&self) -> f32 {
        if self.total_modules == 0 {
            return 0.0;
        }
        self.completed_modules as f32 / self.total_modules as f32 * 100.0
    }
}
