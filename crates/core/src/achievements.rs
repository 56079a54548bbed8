//! Achievement catalogue evaluated against a user's statistics.

use serde::Serialize;

use crate::progress::StatisticsSummary;

/// What an achievement measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementKind {
    /// Total answers submitted.
    Questions,
    /// Correct answers submitted.
    CorrectAnswers,
    /// Distinct books with a history record.
    Books,
    /// Overall accuracy percentage.
    Accuracy,
}

struct AchievementDef {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    kind: AchievementKind,
    requirement: i64,
}

const CATALOGUE: &[AchievementDef] = &[
    AchievementDef {
        id: "first_steps",
        title: "First steps",
        description: "Answer 10 questions",
        kind: AchievementKind::Questions,
        requirement: 10,
    },
    AchievementDef {
        id: "curious_mind",
        title: "Curious mind",
        description: "Answer 50 questions",
        kind: AchievementKind::Questions,
        requirement: 50,
    },
    AchievementDef {
        id: "knowledge_seeker",
        title: "Knowledge seeker",
        description: "Answer 100 questions",
        kind: AchievementKind::Questions,
        requirement: 100,
    },
    AchievementDef {
        id: "master_of_knowledge",
        title: "Master of knowledge",
        description: "Answer 500 questions",
        kind: AchievementKind::Questions,
        requirement: 500,
    },
    AchievementDef {
        id: "book_starter",
        title: "Book starter",
        description: "Study 3 books",
        kind: AchievementKind::Books,
        requirement: 3,
    },
    AchievementDef {
        id: "book_enthusiast",
        title: "Book enthusiast",
        description: "Study 10 books",
        kind: AchievementKind::Books,
        requirement: 10,
    },
    AchievementDef {
        id: "accurate_learner",
        title: "Accurate learner",
        description: "Reach 80% accuracy",
        kind: AchievementKind::Accuracy,
        requirement: 80,
    },
    AchievementDef {
        id: "perfect_accuracy",
        title: "Perfection",
        description: "Reach 95% accuracy",
        kind: AchievementKind::Accuracy,
        requirement: 95,
    },
    AchievementDef {
        id: "hundred_correct",
        title: "Hundred correct",
        description: "Answer 100 questions correctly",
        kind: AchievementKind::CorrectAnswers,
        requirement: 100,
    },
];

/// An achievement with the user's progress towards it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Achievement {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub kind: AchievementKind,
    pub requirement: i64,
    pub current_progress: f64,
    pub unlocked: bool,
}

/// Evaluate every achievement in the catalogue against `stats`.
pub fn evaluate(stats: &StatisticsSummary) -> Vec<Achievement> {
    CATALOGUE
        .iter()
        .map(|def| {
            let current_progress = match def.kind {
                AchievementKind::Questions => stats.total_questions as f64,
                AchievementKind::CorrectAnswers => stats.correct_answers as f64,
                AchievementKind::Books => stats.books_studied as f64,
                AchievementKind::Accuracy => stats.accuracy_percent(),
            };
            Achievement {
                id: def.id,
                title: def.title,
                description: def.description,
                kind: def.kind,
                requirement: def.requirement,
                current_progress,
                unlocked: current_progress >= def.requirement as f64,
            }
        })
        .collect()
}
