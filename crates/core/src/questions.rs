//! Question difficulty tags and the pluggable question generator.
//!
//! Question generation is an external collaborator: a [`QuestionGenerator`]
//! takes a chapter's content and returns drafts that the caller persists.
//! [`PlaceholderGenerator`] is the shipped implementation and produces canned
//! text until a real model integration is configured.

use async_trait::async_trait;
use serde::Serialize;

use crate::chapters::Chapter;
use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Difficulty levels
// ---------------------------------------------------------------------------

pub const LEVEL_EASY: &str = "easy";
pub const LEVEL_MEDIUM: &str = "medium";
pub const LEVEL_HARD: &str = "hard";

/// All valid difficulty tags, in generation rotation order.
pub const VALID_LEVELS: &[&str] = &[LEVEL_EASY, LEVEL_MEDIUM, LEVEL_HARD];

/// Difficulty assigned when a question is created without one.
pub const DEFAULT_LEVEL: &str = LEVEL_MEDIUM;

/// Validate that `level` is `easy`, `medium` or `hard`.
pub fn validate_level(level: &str) -> Result<(), CoreError> {
    if VALID_LEVELS.contains(&level) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid question level '{level}'. Must be one of: {VALID_LEVELS:?}"
        )))
    }
}

/// Difficulty for the `index`-th generated question (cycles easy, medium, hard).
pub fn rotating_level(index: usize) -> &'static str {
    VALID_LEVELS[index % VALID_LEVELS.len()]
}

// ---------------------------------------------------------------------------
// Generation request bounds
// ---------------------------------------------------------------------------

/// Number of questions generated when the caller does not specify a count.
pub const DEFAULT_GENERATE_COUNT: i64 = 5;

/// Upper bound on questions generated per request.
pub const MAX_GENERATE_COUNT: i64 = 50;

/// Validate a requested generation count, applying the default when absent.
pub fn validate_generate_count(count: Option<i64>) -> Result<usize, CoreError> {
    let count = count.unwrap_or(DEFAULT_GENERATE_COUNT);
    if !(1..=MAX_GENERATE_COUNT).contains(&count) {
        return Err(CoreError::Validation(format!(
            "count must be between 1 and {MAX_GENERATE_COUNT}, got {count}"
        )));
    }
    Ok(count as usize)
}

// ---------------------------------------------------------------------------
// Generator interface
// ---------------------------------------------------------------------------

/// The chapter a generator works from.
#[derive(Debug, Clone, Copy)]
pub struct ChapterSource<'a> {
    pub book_id: DbId,
    pub book_name: &'a str,
    pub chapter: &'a Chapter,
}

/// A generated question that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionDraft {
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub ai_answer: Option<String>,
    pub question_level: String,
}

/// Produces quiz questions from chapter content.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Produce exactly `count` drafts for `source`.
    async fn generate(
        &self,
        source: ChapterSource<'_>,
        count: usize,
    ) -> Result<Vec<QuestionDraft>, CoreError>;
}

/// Canned options used by [`PlaceholderGenerator`].
pub const PLACEHOLDER_OPTIONS: [&str; 4] = ["Option A", "Option B", "Option C", "Option D"];

/// Explanation attached to every placeholder question.
pub const PLACEHOLDER_EXPLANATION: &str = "Placeholder explanation pending model integration";

/// Generator that does no content analysis and returns fixed text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderGenerator;

#[async_trait]
impl QuestionGenerator for PlaceholderGenerator {
    fn name(&self) -> &'static str {
        "placeholder"
    }

    async fn generate(
        &self,
        source: ChapterSource<'_>,
        count: usize,
    ) -> Result<Vec<QuestionDraft>, CoreError> {
        let drafts = (0..count)
            .map(|i| QuestionDraft {
                question_text: format!(
                    "Generated question {} for chapter \"{}\"",
                    i + 1,
                    source.chapter.title
                ),
                options: PLACEHOLDER_OPTIONS.iter().map(|o| o.to_string()).collect(),
                correct_answer: PLACEHOLDER_OPTIONS[0].to_string(),
                ai_answer: Some(PLACEHOLDER_EXPLANATION.to_string()),
                question_level: rotating_level(i).to_string(),
            })
            .collect();
        Ok(drafts)
    }
}
