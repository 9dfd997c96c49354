//! Built-in sample data standing in for a backend.

use crate::domain::{
    Achievement, AchievementType, Assessment, AssessmentForm, AssessmentKind, AssessmentSettings,
    AssessmentStatus, ContentStatus, ContentType, CurrentModule, Difficulty, LearningProgress,
    ModuleContent, ProgressMetric, Submission,
};

fn seed_settings() -> AssessmentSettings {
    AssessmentSettings {
        allow_late_submission: false,
        show_results: true,
        randomize_questions: false,
        time_limit: true,
    }
}

pub fn seed_assessments() -> Vec<Assessment> {
    vec![
        Assessment {
            id: "1".into(),
            form: AssessmentForm {
                title: "React Fundamentals Quiz".into(),
                description: "Test your knowledge of React basics".into(),
                due_date: "2024-03-30".into(),
                settings: seed_settings(),
                kind: AssessmentKind::Quiz,
                status: AssessmentStatus::Published,
                ..Default::default()
            },
        },
        Assessment {
            id: "2".into(),
            form: AssessmentForm {
                title: "Project Phase 1".into(),
                description: "Complete the first phase of your project".into(),
                due_date: "2024-04-05".into(),
                settings: seed_settings(),
                kind: AssessmentKind::Project,
                status: AssessmentStatus::Draft,
                ..Default::default()
            },
        },
    ]
}

pub fn seed_submissions() -> Vec<Submission> {
    vec![
        Submission {
            id: 1,
            question: "What is the capital of France?".into(),
            answer: "Paris".into(),
            grade: 5,
            feedback: "Correct answer! Well done!".into(),
        },
        Submission {
            id: 2,
            question: "Solve the equation: 2x + 5 = 13".into(),
            answer: "x = 4".into(),
            grade: 4,
            feedback: "Good work! Consider showing your steps next time.".into(),
        },
    ]
}

fn content(
    id: &str,
    title: &str,
    kind: ContentType,
    duration: &str,
    status: ContentStatus,
    progress: u8,
) -> ModuleContent {
    ModuleContent {
        id: id.into(),
        title: title.into(),
        kind,
        duration: Some(duration.into()),
        status,
        progress,
        points: None,
        due_date: None,
        difficulty: None,
    }
}

pub fn seed_current_module() -> CurrentModule {
    CurrentModule {
        module_title: "Advanced Mathematics".into(),
        module_description: "This module covers advanced mathematical concepts including calculus, linear algebra, and differential equations. Students will learn to solve complex problems and apply mathematical principles to real-world scenarios.".into(),
        overall_progress: 65,
        instructor: "Dr. Sarah Johnson".into(),
        last_updated: "March 20, 2024".into(),
        contents: vec![
            ModuleContent {
                difficulty: Some(Difficulty::Medium),
                points: Some(10),
                ..content("1", "Introduction to Calculus", ContentType::Video, "45 mins", ContentStatus::Completed, 100)
            },
            ModuleContent {
                difficulty: Some(Difficulty::Easy),
                points: Some(5),
                ..content("2", "Limits and Continuity", ContentType::Reading, "30 mins", ContentStatus::Completed, 100)
            },
            ModuleContent {
                difficulty: Some(Difficulty::Hard),
                points: Some(15),
                due_date: Some("March 25, 2024".into()),
                ..content("3", "Derivatives Quiz", ContentType::Quiz, "20 mins", ContentStatus::InProgress, 60)
            },
            ModuleContent {
                difficulty: Some(Difficulty::Hard),
                points: Some(20),
                ..content("4", "Optimization Problem Set", ContentType::Assignment, "60 mins", ContentStatus::Locked, 0)
            },
        ],
    }
}

/// Course contents listed on the learning page.
pub fn seed_course_contents() -> Vec<ModuleContent> {
    vec![
        content("1", "Custom Hooks Deep Dive", ContentType::Video, "45 mins", ContentStatus::Completed, 100),
        content("2", "Performance Optimization", ContentType::Reading, "30 mins", ContentStatus::InProgress, 50),
        content("3", "State Management Patterns", ContentType::Quiz, "20 mins", ContentStatus::Pending, 0),
    ]
}

fn metric(label: &str, value: u32, target: u32, unit: &str, color: &str, trend: i32) -> ProgressMetric {
    ProgressMetric {
        label: label.into(),
        value,
        target,
        unit: unit.into(),
        color: color.into(),
        trend: Some(trend),
        description: None,
    }
}

fn achievement(id: &str, title: &str, description: &str, date: &str, kind: AchievementType, points: u32) -> Achievement {
    Achievement {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        date: date.into(),
        kind,
        points: Some(points),
    }
}

pub fn seed_learning_progress() -> LearningProgress {
    LearningProgress {
        metrics: vec![
            metric("Quiz Scores", 85, 100, "points", "primary", 5),
            metric("Assignment Completion", 12, 15, "assignments", "success", 2),
            metric("Study Hours", 25, 30, "hours", "warning", -3),
            metric("Participation", 90, 100, "%", "success", 0),
        ],
        achievements: vec![
            achievement("1", "Perfect Quiz Score", "Achieved 100% in the Calculus Quiz", "March 15, 2024", AchievementType::Achievement, 50),
            achievement("2", "Weekly Streak", "Completed all assignments for 5 consecutive weeks", "March 18, 2024", AchievementType::Milestone, 100),
            achievement("3", "Advanced Mathematics Certificate", "Completed all modules in Advanced Mathematics", "March 20, 2024", AchievementType::Certificate, 200),
        ],
        study_time: "25 hours".into(),
        completed_modules: 8,
        total_modules: 12,
        streak: 5,
        next_milestone: "Complete 3 more assignments to earn the \"Consistent Learner\" badge".into(),
    }
}

/// Metrics and achievements shown on the progress page.
pub fn seed_progress_overview() -> (Vec<ProgressMetric>, Vec<Achievement>) {
    let metrics = vec![
        ProgressMetric { description: Some("Average score across all quizzes".into()), ..metric("Quiz Performance", 85, 100, "%", "primary", 0) },
        ProgressMetric { description: Some("Completed assignments on time".into()), ..metric("Assignment Completion", 80, 100, "%", "success", 0) },
        ProgressMetric { description: Some("Active participation in discussions".into()), ..metric("Participation", 90, 100, "%", "warning", 0) },
    ];
    let achievements = vec![
        achievement("1", "Perfect Quiz Score", "Advanced React Patterns Quiz", "", AchievementType::Achievement, 50),
        achievement("2", "Weekly Streak", "7 days of consistent learning", "", AchievementType::Milestone, 100),
        achievement("3", "Project Milestone", "Completed first major project", "", AchievementType::Milestone, 200),
    ];
    (metrics, achievements)
}
