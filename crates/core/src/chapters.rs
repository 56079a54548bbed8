//! Embedded chapter list operations.
//!
//! Chapters have no lifecycle of their own: they live inside a book's
//! `chapters` JSONB column and are mutated through these functions while the
//! repository holds a row lock on the owning book. Chapter ids are derived
//! from the creation time; chapter numbers are caller-controlled, so
//! duplicates and gaps are accepted as long as each number is at least 1.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Prefix of every generated chapter id.
pub const CHAPTER_ID_PREFIX: &str = "chapter-";

/// A chapter embedded in a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: String,
    pub title: String,
    pub content: String,
    pub chapter_number: i32,
}

/// Input for appending a chapter to a book.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewChapter {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    pub content: String,
    #[validate(range(min = 1, message = "chapter_number must be at least 1"))]
    pub chapter_number: i32,
}

/// Partial update for an existing chapter. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ChapterPatch {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    pub content: Option<String>,
    #[validate(range(min = 1, message = "chapter_number must be at least 1"))]
    pub chapter_number: Option<i32>,
}

/// Derive a chapter id from `now` that is unique within `existing`.
///
/// The base form is `chapter-<unix millis>`. Two chapters added within the
/// same millisecond get `-2`, `-3`, ... suffixes.
pub fn next_chapter_id(now: Timestamp, existing: &[Chapter]) -> String {
    let base = format!("{CHAPTER_ID_PREFIX}{}", now.timestamp_millis());
    if !existing.iter().any(|c| c.id == base) {
        return base;
    }
    let mut suffix = 2;
    loop {
        let candidate = format!("{base}-{suffix}");
        if !existing.iter().any(|c| c.id == candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

/// Find a chapter by id.
pub fn find_chapter<'a>(chapters: &'a [Chapter], chapter_id: &str) -> Option<&'a Chapter> {
    chapters.iter().find(|c| c.id == chapter_id)
}

/// Validate `input`, assign it a fresh id and append it to `chapters`.
pub fn add_chapter(
    chapters: &mut Vec<Chapter>,
    input: NewChapter,
    now: Timestamp,
) -> Result<Chapter, CoreError> {
    input.validate()?;

    let chapter = Chapter {
        id: next_chapter_id(now, chapters),
        title: input.title,
        content: input.content,
        chapter_number: input.chapter_number,
    };
    chapters.push(chapter.clone());
    Ok(chapter)
}

/// Merge `patch` into the chapter with id `chapter_id`.
///
/// Fails with [`CoreError::NotFound`] when no such chapter exists and with
/// [`CoreError::Validation`] when the patch is invalid; in both cases the
/// list is left unchanged.
pub fn update_chapter(
    chapters: &mut [Chapter],
    chapter_id: &str,
    patch: ChapterPatch,
) -> Result<Chapter, CoreError> {
    patch.validate()?;

    let chapter = chapters
        .iter_mut()
        .find(|c| c.id == chapter_id)
        .ok_or_else(|| CoreError::not_found("Chapter", chapter_id))?;

    if let Some(title) = patch.title {
        chapter.title = title;
    }
    if let Some(content) = patch.content {
        chapter.content = content;
    }
    if let Some(number) = patch.chapter_number {
        chapter.chapter_number = number;
    }
    Ok(chapter.clone())
}

/// Remove the chapter with id `chapter_id`, returning it.
///
/// Fails with [`CoreError::NotFound`] (list unchanged) when absent.
pub fn delete_chapter(chapters: &mut Vec<Chapter>, chapter_id: &str) -> Result<Chapter, CoreError> {
    let index = chapters
        .iter()
        .position(|c| c.id == chapter_id)
        .ok_or_else(|| CoreError::not_found("Chapter", chapter_id))?;
    Ok(chapters.remove(index))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::TimeZone;

    use super::*;

    fn at(millis: i64) -> Timestamp {
        chrono::Utc.timestamp_millis_opt(millis).unwrap()
    }

    fn chapter(id: &str, number: i32) -> Chapter {
        Chapter {
            id: id.to_string(),
            title: format!("Title {number}"),
            content: String::new(),
            chapter_number: number,
        }
    }

    fn new_chapter(title: &str, number: i32) -> NewChapter {
        NewChapter {
            title: title.to_string(),
            content: "Once upon a time".to_string(),
            chapter_number: number,
        }
    }

    #[test]
    fn add_assigns_time_derived_id_and_appends() {
        let mut chapters = vec![chapter("c1", 1)];
        let added = add_chapter(&mut chapters, new_chapter("Second", 2), at(1_700_000_000_000))
            .expect("valid chapter");

        assert_eq!(added.id, "chapter-1700000000000");
        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[1], added);
    }

    #[test]
    fn add_within_same_millisecond_gets_unique_ids() {
        let mut chapters = Vec::new();
        let now = at(1_000);
        let a = add_chapter(&mut chapters, new_chapter("A", 1), now).unwrap();
        let b = add_chapter(&mut chapters, new_chapter("B", 2), now).unwrap();
        let c = add_chapter(&mut chapters, new_chapter("C", 3), now).unwrap();

        assert_eq!(a.id, "chapter-1000");
        assert_eq!(b.id, "chapter-1000-2");
        assert_eq!(c.id, "chapter-1000-3");
    }

    #[test]
    fn add_allows_duplicate_and_non_contiguous_numbers() {
        let mut chapters = vec![chapter("c1", 1)];
        add_chapter(&mut chapters, new_chapter("Dup", 1), at(1)).unwrap();
        add_chapter(&mut chapters, new_chapter("Gap", 7), at(2)).unwrap();

        let numbers: Vec<i32> = chapters.iter().map(|c| c.chapter_number).collect();
        assert_eq!(numbers, vec![1, 1, 7]);
    }

    #[test]
    fn add_rejects_zero_chapter_number() {
        let mut chapters = Vec::new();
        let result = add_chapter(&mut chapters, new_chapter("Zero", 0), at(1));
        assert_matches!(result, Err(CoreError::Validation(_)));
        assert!(chapters.is_empty());
    }

    #[test]
    fn add_rejects_empty_title() {
        let mut chapters = Vec::new();
        let result = add_chapter(&mut chapters, new_chapter("", 1), at(1));
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[test]
    fn update_merges_only_given_fields() {
        let mut chapters = vec![chapter("c1", 1), chapter("c2", 2)];
        let patch = ChapterPatch {
            content: Some("Rewritten".to_string()),
            ..ChapterPatch::default()
        };

        let updated = update_chapter(&mut chapters, "c2", patch).unwrap();

        assert_eq!(updated.title, "Title 2");
        assert_eq!(updated.content, "Rewritten");
        assert_eq!(updated.chapter_number, 2);
        assert_eq!(chapters[1], updated);
        assert_eq!(chapters[0], chapter("c1", 1));
    }

    #[test]
    fn update_missing_chapter_is_not_found() {
        let mut chapters = vec![chapter("c1", 1)];
        let result = update_chapter(&mut chapters, "nope", ChapterPatch::default());
        assert_matches!(result, Err(CoreError::NotFound { entity: "Chapter", .. }));
    }

    #[test]
    fn delete_removes_matching_chapter() {
        let mut chapters = vec![chapter("c1", 1), chapter("c2", 2)];
        let removed = delete_chapter(&mut chapters, "c1").unwrap();

        assert_eq!(removed.id, "c1");
        assert_eq!(chapters, vec![chapter("c2", 2)]);
    }

    #[test]
    fn delete_missing_chapter_leaves_list_unchanged() {
        let mut chapters = vec![chapter("c1", 1), chapter("c2", 2)];
        let before = chapters.clone();

        let result = delete_chapter(&mut chapters, "c3");

        assert_matches!(result, Err(CoreError::NotFound { ref id, .. }) if id == "c3");
        assert_eq!(chapters, before);
    }

    #[test]
    fn find_chapter_by_id() {
        let chapters = vec![chapter("c1", 1), chapter("c2", 2)];
        assert_eq!(find_chapter(&chapters, "c2").map(|c| c.chapter_number), Some(2));
        assert!(find_chapter(&chapters, "c9").is_none());
    }
}
