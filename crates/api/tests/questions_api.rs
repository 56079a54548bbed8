//! HTTP-level integration tests for the question bank and generation.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json_auth, token_for};
use lectern_db::models::book::ChapterChange;
use lectern_db::repositories::{BookRepo, NotificationRepo};
use serde_json::json;
use sqlx::PgPool;

/// Add one chapter to `book_id` directly and return its id.
async fn seed_chapter(pool: &PgPool, book_id: i64) -> String {
    let change = BookRepo::modify_chapters(pool, book_id, |list| {
        lectern_core::chapters::add_chapter(
            list,
            lectern_core::chapters::NewChapter {
                title: "Arrakis".to_string(),
                content: "Sand and spice.".to_string(),
                chapter_number: 1,
            },
            chrono::Utc::now(),
        )
    })
    .await
    .unwrap();
    match change {
        ChapterChange::Applied { output, .. } => output.id,
        other => panic!("chapter should be added, got {other:?}"),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn generate_persists_rotating_levels_and_notifies(pool: PgPool) {
    let teacher = common::create_user(&pool, "teach", "teacher").await;
    let book = common::create_book(&pool, teacher.id, "Dune", true).await;
    let chapter_id = seed_chapter(&pool, book.id).await;
    let app = common::build_test_app(pool.clone());

    let response = post_json_auth(
        app,
        "/api/v1/questions/generate?count=3",
        json!({ "book_id": book.id, "chapter_id": chapter_id }),
        &token_for(&teacher),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let questions = json.as_array().unwrap();
    assert_eq!(questions.len(), 3);
    let levels: Vec<&str> = questions
        .iter()
        .map(|q| q["question_level"].as_str().unwrap())
        .collect();
    assert_eq!(levels, vec!["easy", "medium", "hard"]);
    for question in questions {
        assert_eq!(question["is_generated"], true);
        assert_eq!(question["book_id"], book.id);
        assert_eq!(question["chapter_id"], chapter_id.as_str());
        assert_eq!(question["options"].as_array().unwrap().len(), 4);
    }

    let inbox = NotificationRepo::list_for_user(&pool, teacher.id, false)
        .await
        .unwrap();
    assert_eq!(inbox.len(), 1);
    assert!(inbox[0].message.starts_with("3 questions"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn generate_defaults_to_five(pool: PgPool) {
    let author = common::create_user(&pool, "writer", "author").await;
    let book = common::create_book(&pool, author.id, "Dune", false).await;
    let chapter_id = seed_chapter(&pool, book.id).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/questions/generate",
        json!({ "book_id": book.id, "chapter_id": chapter_id }),
        &token_for(&author),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 5);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn generate_rejects_out_of_range_count(pool: PgPool) {
    let author = common::create_user(&pool, "writer", "author").await;
    let book = common::create_book(&pool, author.id, "Dune", false).await;
    let chapter_id = seed_chapter(&pool, book.id).await;
    let token = token_for(&author);

    for count in [0, 51] {
        let app = common::build_test_app(pool.clone());
        let response = post_json_auth(
            app,
            &format!("/api/v1/questions/generate?count={count}"),
            json!({ "book_id": book.id, "chapter_id": chapter_id }),
            &token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "count={count}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn generate_unknown_chapter_or_book_is_not_found(pool: PgPool) {
    let author = common::create_user(&pool, "writer", "author").await;
    let book = common::create_book(&pool, author.id, "Dune", false).await;
    let app = common::build_test_app(pool);
    let token = token_for(&author);

    let response = post_json_auth(
        app.clone(),
        "/api/v1/questions/generate?count=2",
        json!({ "book_id": book.id, "chapter_id": "chapter-0" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_json_auth(
        app,
        "/api/v1/questions/generate?count=2",
        json!({ "book_id": 999999, "chapter_id": "chapter-0" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn students_cannot_generate(pool: PgPool) {
    let author = common::create_user(&pool, "writer", "author").await;
    let student = common::create_user(&pool, "reader", "student").await;
    let book = common::create_book(&pool, author.id, "Dune", true).await;
    let chapter_id = seed_chapter(&pool, book.id).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/questions/generate",
        json!({ "book_id": book.id, "chapter_id": chapter_id }),
        &token_for(&student),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_validates_level_and_content(pool: PgPool) {
    let author = common::create_user(&pool, "writer", "author").await;
    let book = common::create_book(&pool, author.id, "Dune", false).await;
    let token = token_for(&author);

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/questions",
        json!({
            "book_id": book.id,
            "question_text": "Who rules Arrakis?",
            "options": ["Atreides", "Harkonnen"],
            "correct_answer": "Atreides",
            "question_level": "impossible",
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/questions",
        json!({
            "book_id": book.id,
            "question_text": "Who rules Arrakis?",
            "options": [],
            "correct_answer": "Atreides",
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/questions",
        json!({
            "book_id": book.id,
            "question_text": "Who rules Arrakis?",
            "options": ["Atreides", "Harkonnen"],
            "correct_answer": "Atreides",
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["question_level"], "medium");
    assert!(json["chapter_id"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn listings_filter_by_book_chapter_and_level(pool: PgPool) {
    let author = common::create_user(&pool, "writer", "author").await;
    let book = common::create_book(&pool, author.id, "Dune", false).await;
    let other = common::create_book(&pool, author.id, "Emma", false).await;
    let chapter_id = seed_chapter(&pool, book.id).await;
    let token = token_for(&author);

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/questions/generate?count=4",
        json!({ "book_id": book.id, "chapter_id": chapter_id }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool.clone());
    let uri = format!("/api/v1/questions/book/{}", book.id);
    let response = get_auth(app, &uri, &token).await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 4);

    let app = common::build_test_app(pool.clone());
    let uri = format!("/api/v1/questions/book/{}", other.id);
    let response = get_auth(app, &uri, &token).await;
    assert!(body_json(response).await.as_array().unwrap().is_empty());

    let app = common::build_test_app(pool.clone());
    let uri = format!("/api/v1/questions/chapter/{chapter_id}");
    let response = get_auth(app, &uri, &token).await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 4);

    // Levels rotate easy, medium, hard, easy.
    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/questions/level/easy", &token).await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/questions/level/expert", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
