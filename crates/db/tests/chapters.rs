//! Integration tests for chapter edits under the book row lock.

use assert_matches::assert_matches;
use chrono::Utc;
use lectern_core::chapters::{add_chapter, delete_chapter, update_chapter, ChapterPatch, NewChapter};
use lectern_core::error::CoreError;
use lectern_db::models::book::{ChapterChange, CreateBook};
use lectern_db::models::user::CreateUser;
use lectern_db::repositories::{BookRepo, UserRepo};
use sqlx::PgPool;

async fn seed_book(pool: &PgPool) -> i64 {
    let author = UserRepo::create(
        pool,
        &CreateUser {
            username: "author".to_string(),
            email: "author@example.com".to_string(),
            password_hash: "not-a-real-hash".to_string(),
            phone: None,
        },
    )
    .await
    .unwrap();
    let book = BookRepo::create(
        pool,
        author.id,
        &CreateBook {
            name: "Tales".to_string(),
            category: None,
            description: None,
            cover_image: None,
            is_public: None,
        },
    )
    .await
    .unwrap();
    assert!(!book.is_public);
    assert!(book.chapters.0.is_empty());
    book.id
}

fn new_chapter(title: &str, number: i32) -> NewChapter {
    NewChapter {
        title: title.to_string(),
        content: format!("{title} content"),
        chapter_number: number,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn add_update_delete_round(pool: PgPool) {
    let book_id = seed_book(&pool).await;

    let change = BookRepo::modify_chapters(&pool, book_id, |chapters| {
        add_chapter(chapters, new_chapter("One", 1), Utc::now())
    })
    .await
    .unwrap();
    let chapter = assert_matches!(change, ChapterChange::Applied { output, book } => {
        assert_eq!(book.chapters.0.len(), 1);
        output
    });
    assert!(chapter.id.starts_with("chapter-"));

    let patch = ChapterPatch {
        title: Some("Uno".to_string()),
        ..Default::default()
    };
    let id = chapter.id.clone();
    let change = BookRepo::modify_chapters(&pool, book_id, |chapters| {
        update_chapter(chapters, &id, patch)
    })
    .await
    .unwrap();
    assert_matches!(change, ChapterChange::Applied { output, .. } => {
        assert_eq!(output.title, "Uno");
        assert_eq!(output.content, "One content");
    });

    let change = BookRepo::modify_chapters(&pool, book_id, |chapters| {
        delete_chapter(chapters, &id)
    })
    .await
    .unwrap();
    assert_matches!(change, ChapterChange::Applied { book, .. } => {
        assert!(book.chapters.0.is_empty());
    });
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_missing_chapter_leaves_list_unchanged(pool: PgPool) {
    let book_id = seed_book(&pool).await;
    let now = Utc::now();
    BookRepo::modify_chapters(&pool, book_id, |chapters| {
        add_chapter(chapters, new_chapter("One", 1), now)?;
        add_chapter(chapters, new_chapter("Two", 2), now)
    })
    .await
    .unwrap();

    let change = BookRepo::modify_chapters(&pool, book_id, |chapters| {
        delete_chapter(chapters, "chapter-0")
    })
    .await
    .unwrap();
    assert_matches!(change, ChapterChange::Rejected(CoreError::NotFound { .. }));

    let book = BookRepo::find_by_id(&pool, book_id).await.unwrap().unwrap();
    let titles: Vec<&str> = book.chapters.0.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["One", "Two"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_book_is_reported(pool: PgPool) {
    let change = BookRepo::modify_chapters(&pool, 424242, |chapters| {
        add_chapter(chapters, new_chapter("One", 1), Utc::now())
    })
    .await
    .unwrap();
    assert_matches!(change, ChapterChange::BookNotFound);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_adds_are_not_lost(pool: PgPool) {
    let book_id = seed_book(&pool).await;

    let mut handles = Vec::new();
    for i in 1..=6 {
        let pool = pool.clone();
        handles.push(tokio::spawn(async move {
            BookRepo::modify_chapters(&pool, book_id, |chapters| {
                add_chapter(chapters, new_chapter(&format!("Chapter {i}"), i), Utc::now())
            })
            .await
        }));
    }
    for handle in handles {
        assert_matches!(handle.await.unwrap().unwrap(), ChapterChange::Applied { .. });
    }

    let book = BookRepo::find_by_id(&pool, book_id).await.unwrap().unwrap();
    assert_eq!(book.chapters.0.len(), 6);
    let mut ids: Vec<&str> = book.chapters.0.iter().map(|c| c.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 6, "chapter ids must be unique within a book");
}
