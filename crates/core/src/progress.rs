//! Quiz progress arithmetic: answer tallies, accuracy, statistics and levels.
//!
//! Pure functions over pre-loaded history totals. The repository layer owns
//! the atomic counter updates; this module owns the read-side derivation so
//! that it can be tested without a database.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// Number of answers per "unit" in the level curve.
pub const ANSWERS_PER_LEVEL_UNIT: f64 = 10.0;

/// Level every user starts at.
pub const STARTING_LEVEL: i32 = 1;

/// One entry in a history record's append-only answer log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerEvent {
    pub question_id: DbId,
    pub user_answer: String,
    pub is_correct: bool,
    pub timestamp: Timestamp,
}

/// Running counters of a single (user, book) history record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryTotals {
    pub total_questions: i32,
    pub correct_answers: i32,
}

/// Aggregated statistics across one or more history records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatisticsSummary {
    pub total_questions: i64,
    pub correct_answers: i64,
    pub incorrect_answers: i64,
    /// Percentage with exactly two decimals, e.g. `"50.00"`.
    pub accuracy: String,
    /// Number of history records (one per book answered in).
    pub books_studied: i64,
}

impl StatisticsSummary {
    /// Accuracy as a number, for threshold comparisons.
    pub fn accuracy_percent(&self) -> f64 {
        accuracy_percent(self.correct_answers, self.total_questions)
    }
}

/// `correct / total * 100`, defined as `0.0` when `total` is zero.
pub fn accuracy_percent(correct: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    correct as f64 / total as f64 * 100.0
}

/// Render `correct / total * 100` with exactly two decimals, rounding half up.
///
/// Works in integer hundredths so that exact ties such as 1/32 (3.125%)
/// round to `"3.13"` instead of to even. Zero total renders as `"0.00"`.
pub fn format_accuracy(correct: i64, total: i64) -> String {
    if total <= 0 {
        return "0.00".to_string();
    }
    let hundredths = (correct * 20_000 + total) / (2 * total);
    format!("{}.{:02}", hundredths / 100, hundredths % 100)
}

/// Sum the given history totals into a [`StatisticsSummary`].
pub fn summarize<I>(records: I) -> StatisticsSummary
where
    I: IntoIterator<Item = HistoryTotals>,
{
    let mut total_questions = 0_i64;
    let mut correct_answers = 0_i64;
    let mut books_studied = 0_i64;

    for record in records {
        total_questions += i64::from(record.total_questions);
        correct_answers += i64::from(record.correct_answers);
        books_studied += 1;
    }

    StatisticsSummary {
        total_questions,
        correct_answers,
        incorrect_answers: total_questions - correct_answers,
        accuracy: format_accuracy(correct_answers, total_questions),
        books_studied,
    }
}

/// Level reached after answering `total_answers` questions across all books.
///
/// `floor(sqrt(total / 10)) + 1`: level 2 at 10 answers, 3 at 40, 4 at 90.
pub fn level_for_total(total_answers: i64) -> i32 {
    if total_answers <= 0 {
        return STARTING_LEVEL;
    }
    let units = total_answers as f64 / ANSWERS_PER_LEVEL_UNIT;
    units.sqrt().floor() as i32 + STARTING_LEVEL
}

/// Total answers at which the level after `level` is reached.
pub fn xp_for_level(level: i32) -> i64 {
    let level = i64::from(level.max(STARTING_LEVEL));
    level * level * ANSWERS_PER_LEVEL_UNIT as i64
}
