//! Route dispatcher: literal paths to pages, and the view model each page renders.

use serde::Serialize;
use serde_json::{json, Value};

use crate::domain::Difficulty;
use crate::error::{AppError, AppResult};
use crate::grading::passed;
use crate::seeds::{seed_course_contents, seed_current_module, seed_learning_progress, seed_progress_overview};
use crate::state::AppState;

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Home,
    Teacher,
    Student,
    QuizGenerator,
    Assessments,
    Chat,
    Analytics,
    Learning,
    Progress,
}

pub const ALL_PAGES: [Page; 9] = [
    Page::Home,
    Page::Teacher,
    Page::Student,
    Page::QuizGenerator,
    Page::Assessments,
    Page::Chat,
    Page::Analytics,
    Page::Learning,
    Page::Progress,
];

impl Page {
    /// Trailing slashes are ignored; anything else must match exactly.
    pub fn from_path(path: &str) -> Option<Page> {
        let trimmed = path.trim_end_matches('/');
        let path = if trimmed.is_empty() { "/" } else { trimmed };
        ALL_PAGES.into_iter().find(|p| p.path() == path)
    }

    pub fn path(self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::Teacher => "/teacher",
            Page::Student => "/student",
            Page::QuizGenerator => "/quiz/generate",
            Page::Assessments => "/assessments",
            Page::Chat => "/chat",
            Page::Analytics => "/analytics",
            Page::Learning => "/learning",
            Page::Progress => "/progress",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Welcome to Edu Assistant",
            Page::Teacher => "Teacher Dashboard",
            Page::Student => "Student Dashboard",
            Page::QuizGenerator => "Generate Quiz",
            Page::Assessments => "Assessments",
            Page::Chat => "AI Teaching Assistant",
            Page::Analytics => "Analytics",
            Page::Learning => "Learning Dashboard",
            Page::Progress => "Learning Progress",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NavLink {
    pub label: &'static str,
    pub path: &'static str,
}

pub fn navbar() -> Vec<NavLink> {
    [("Home", Page::Home), ("Assessments", Page::Assessments), ("Chat", Page::Chat), ("Analytics", Page::Analytics)]
        .into_iter()
        .map(|(label, p)| NavLink { label, path: p.path() })
        .collect()
}

#[derive(Debug, Serialize)]
pub struct RouteEntry {
    pub page: Page,
    pub path: &'static str,
    pub title: &'static str,
}

pub fn route_table() -> Vec<RouteEntry> {
    ALL_PAGES
        .into_iter()
        .map(|page| RouteEntry { page, path: page.path(), title: page.title() })
        .collect()
}

#[derive(Debug, Serialize)]
pub struct PageView {
    pub page: Page,
    pub path: &'static str,
    pub title: &'static str,
    pub data: Value,
}

/// Quick-link card: a label that navigates somewhere, optionally with a progress bar.
fn card(title: &str, target: &str, progress: Option<u8>) -> Value {
    let mut v = json!({ "title": title, "target": target });
    if let Some(p) = progress {
        v["progress"] = json!(p);
    }
    v
}

pub async fn render(page: Page, state: &AppState) -> PageView {
    let data = match page {
        Page::Home => json!({
            "subtitle": "Your AI-Powered Virtual Teaching Assistant",
            "roles": [
                { "title": "I'm a Teacher", "target": Page::Teacher.path(),
                  "description": "Access tools for creating assessments, generating quizzes, and tracking student progress" },
                { "title": "I'm a Student", "target": Page::Student.path(),
                  "description": "Access personalized learning materials, take assessments, and get instant feedback" },
            ],
        }),
        Page::Teacher => json!({
            "quickActions": [
                card("Create Assessment", Page::Assessments.path(), None),
                card("Generate Quiz", Page::QuizGenerator.path(), None),
                card("View Analytics", Page::Analytics.path(), None),
                card("Student Chat", Page::Chat.path(), None),
            ],
            "recentActivity": [],
        }),
        Page::Student => json!({
            "modules": [
                card("Current Module", Page::Learning.path(), Some(75)),
                card("Pending Assessments", Page::Assessments.path(), Some(30)),
                card("AI Assistant Chat", Page::Chat.path(), Some(100)),
                card("Learning Progress", Page::Progress.path(), Some(60)),
            ],
            "learningPath": "Your personalized learning path will be generated based on your performance and goals",
        }),
        Page::QuizGenerator => json!({
            "form": state.quiz_form().await,
            "difficulties": [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard],
            "maxQuestions": state.config.quiz.max_questions,
        }),
        Page::Assessments => {
            let items: Vec<Value> = state
                .list_assessments()
                .await
                .into_iter()
                .map(|a| {
                    let color = a.form.status.color();
                    let mut v = json!(a);
                    v["statusColor"] = json!(color);
                    v
                })
                .collect();
            let submissions: Vec<Value> = state
                .list_submissions()
                .await
                .into_iter()
                .map(|s| {
                    let status = if passed(&s) { "passed" } else { "failed" };
                    let mut v = json!(s);
                    v["status"] = json!(status);
                    v
                })
                .collect();
            json!({
                "assessments": items,
                "submissions": submissions,
                "stats": state.submission_stats().await,
            })
        }
        Page::Chat => json!({ "messages": state.chat_history().await }),
        Page::Analytics => {
            let progress = seed_learning_progress();
            json!({
                "metrics": [
                    { "title": "Overall Progress", "value": "85%", "color": "#4CAF50" },
                    { "title": "Completed Assessments", "value": "12/15", "color": "#2196F3" },
                    { "title": "Class Participation", "value": "92%", "color": "#FF9800" },
                    { "title": "Achievement Rate", "value": "78%", "color": "#9C27B0" },
                ],
                "performance": {
                    "title": "Performance Over Time",
                    "labels": ["Week 1", "Week 2", "Week 3", "Week 4", "Week 5"],
                    "datasets": [
                        { "label": "Class Average", "data": [75, 78, 82, 85, 88] },
                        { "label": "Individual Performance", "data": [70, 75, 80, 85, 90] },
                    ],
                },
                "currentModule": seed_current_module(),
                "moduleProgress": progress.module_progress(),
                "learningProgress": progress,
            })
        }
        Page::Learning => json!({
            "course": {
                "title": "Advanced React Patterns",
                "instructor": "Dr. Sarah Chen",
                "progress": 75,
                "contents": seed_course_contents(),
            },
            "stats": [
                { "label": "Study Time", "value": "25 hours this week" },
                { "label": "Points Earned", "value": "450 points" },
                { "label": "Progress", "value": "75% overall completion" },
            ],
        }),
        Page::Progress => {
            let (metrics, achievements) = seed_progress_overview();
            json!({
                "overview": [
                    { "label": "Modules Completed", "value": "8/12" },
                    { "label": "Points Earned", "value": "450" },
                    { "label": "Study Time", "value": "25h" },
                    { "label": "Overall Progress", "value": "75%" },
                ],
                "metrics": metrics,
                "achievements": achievements,
            })
        }
    };
    PageView { page, path: page.path(), title: page.title(), data }
}

pub async fn dispatch(path: &str, state: &AppState) -> AppResult<PageView> {
    let page = Page::from_path(path).ok_or_else(|| AppError::not_found("page", path))?;
    Ok(render(page, state).await)
}
