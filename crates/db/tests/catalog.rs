//! Integration tests for books, questions, users and notifications.

use chrono::Utc;
use lectern_core::chapters::{add_chapter, NewChapter};
use lectern_core::notifications;
use lectern_core::questions::{ChapterSource, PlaceholderGenerator, QuestionGenerator};
use lectern_db::models::book::{ChapterChange, CreateBook, UpdateBook};
use lectern_db::models::notification::CreateNotification;
use lectern_db::models::question::CreateQuestion;
use lectern_db::models::session::CreateSession;
use lectern_db::models::user::CreateUser;
use lectern_db::repositories::{
    BookRepo, NotificationRepo, QuestionRepo, SessionRepo, UserRepo,
};
use sqlx::PgPool;

async fn seed_user(pool: &PgPool, name: &str) -> i64 {
    let input = CreateUser {
        username: name.to_string(),
        email: format!("{name}@example.com"),
        password_hash: "not-a-real-hash".to_string(),
        phone: None,
    };
    UserRepo::create(pool, &input).await.unwrap().id
}

fn book(name: &str, category: &str, is_public: bool) -> CreateBook {
    CreateBook {
        name: name.to_string(),
        category: Some(category.to_string()),
        description: None,
        cover_image: None,
        is_public: Some(is_public),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn book_listings_filter_correctly(pool: PgPool) {
    let alice = seed_user(&pool, "alice").await;
    let bob = seed_user(&pool, "bob").await;
    BookRepo::create(&pool, alice, &book("Dune", "scifi", true)).await.unwrap();
    BookRepo::create(&pool, alice, &book("Emma", "classic", false)).await.unwrap();
    let draft = BookRepo::create(&pool, bob, &book("Draft", "scifi", false)).await.unwrap();

    assert_eq!(BookRepo::list(&pool).await.unwrap().len(), 3);
    assert_eq!(BookRepo::list_public(&pool).await.unwrap().len(), 1);
    assert_eq!(BookRepo::list_by_category(&pool, "scifi").await.unwrap().len(), 2);
    assert_eq!(BookRepo::list_by_author(&pool, alice).await.unwrap().len(), 2);

    let toggled = BookRepo::toggle_public(&pool, draft.id).await.unwrap().unwrap();
    assert!(toggled.is_public);
    assert_eq!(BookRepo::list_public(&pool).await.unwrap().len(), 2);

    let renamed = BookRepo::update(
        &pool,
        draft.id,
        &UpdateBook {
            name: Some("Final".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(renamed.name, "Final");
    assert_eq!(renamed.category.as_deref(), Some("scifi"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn generated_questions_are_persisted(pool: PgPool) {
    let author = seed_user(&pool, "author").await;
    let book = BookRepo::create(&pool, author, &book("Tales", "fiction", true))
        .await
        .unwrap();
    let change = BookRepo::modify_chapters(&pool, book.id, |chapters| {
        add_chapter(
            chapters,
            NewChapter {
                title: "Beginnings".to_string(),
                content: "Once upon a time.".to_string(),
                chapter_number: 1,
            },
            Utc::now(),
        )
    })
    .await
    .unwrap();
    let ChapterChange::Applied { output: chapter, .. } = change else {
        panic!("chapter should have been added");
    };

    let drafts = PlaceholderGenerator
        .generate(
            ChapterSource {
                book_id: book.id,
                book_name: &book.name,
                chapter: &chapter,
            },
            3,
        )
        .await
        .unwrap();
    let saved = QuestionRepo::create_generated(&pool, book.id, &chapter.id, &drafts)
        .await
        .unwrap();

    assert_eq!(saved.len(), 3);
    assert!(saved.iter().all(|q| q.is_generated));
    let levels: Vec<&str> = saved.iter().map(|q| q.question_level.as_str()).collect();
    assert_eq!(levels, vec!["easy", "medium", "hard"]);

    let by_chapter = QuestionRepo::list_by_chapter(&pool, &chapter.id).await.unwrap();
    assert_eq!(by_chapter.len(), 3);
    assert_eq!(QuestionRepo::list_by_level(&pool, "hard").await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn question_defaults_and_cascade(pool: PgPool) {
    let author = seed_user(&pool, "author").await;
    let book = BookRepo::create(&pool, author, &book("Tales", "fiction", true))
        .await
        .unwrap();

    let question = QuestionRepo::create(
        &pool,
        &CreateQuestion {
            book_id: book.id,
            chapter_id: None,
            question_text: "Who wrote it?".to_string(),
            options: vec!["Me".to_string(), "You".to_string()],
            correct_answer: "Me".to_string(),
            ai_answer: None,
            question_level: None,
            is_generated: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(question.question_level, "medium");
    assert!(question.is_generated);
    assert_eq!(question.options, vec!["Me", "You"]);

    BookRepo::delete(&pool, book.id).await.unwrap();
    assert!(QuestionRepo::find_by_id(&pool, question.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn user_book_list_and_level(pool: PgPool) {
    let user = seed_user(&pool, "reader").await;

    UserRepo::add_book(&pool, user, 5).await.unwrap();
    let updated = UserRepo::add_book(&pool, user, 5).await.unwrap().unwrap();
    assert_eq!(updated.book_ids, vec![5]);

    let updated = UserRepo::remove_book(&pool, user, 5).await.unwrap().unwrap();
    assert!(updated.book_ids.is_empty());

    let mut tx = pool.begin().await.unwrap();
    assert!(UserRepo::raise_level(&mut tx, user, 3).await.unwrap());
    assert!(!UserRepo::raise_level(&mut tx, user, 3).await.unwrap());
    assert!(!UserRepo::raise_level(&mut tx, user, 2).await.unwrap());
    tx.commit().await.unwrap();
    let found = UserRepo::find_by_id(&pool, user).await.unwrap().unwrap();
    assert_eq!(found.level, 3);

    assert!(UserRepo::deactivate(&pool, user).await.unwrap());
    let found = UserRepo::find_by_id(&pool, user).await.unwrap().unwrap();
    assert!(!found.is_active);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_email_violates_unique_constraint(pool: PgPool) {
    seed_user(&pool, "reader").await;
    let err = UserRepo::create(
        &pool,
        &CreateUser {
            username: "someone-else".to_string(),
            email: "reader@example.com".to_string(),
            password_hash: "x".to_string(),
            phone: None,
        },
    )
    .await
    .unwrap_err();
    let db_err = err.as_database_error().unwrap();
    assert_eq!(db_err.constraint(), Some("uq_users_email"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn notifications_are_owner_scoped(pool: PgPool) {
    let alice = seed_user(&pool, "alice").await;
    let bob = seed_user(&pool, "bob").await;

    let first = NotificationRepo::create(
        &pool,
        &CreateNotification::from_template(alice, notifications::level_up(2)),
    )
    .await
    .unwrap();
    NotificationRepo::create(
        &pool,
        &CreateNotification {
            user_id: alice,
            title: "Hello".to_string(),
            message: "Welcome".to_string(),
            notification_type: None,
            link: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(first.notification_type, "success");

    assert_eq!(NotificationRepo::unread_count(&pool, alice).await.unwrap(), 2);
    assert!(NotificationRepo::find_for_user(&pool, first.id, bob).await.unwrap().is_none());
    assert!(NotificationRepo::mark_read(&pool, first.id, bob).await.unwrap().is_none());
    assert!(!NotificationRepo::delete(&pool, first.id, bob).await.unwrap());

    let read = NotificationRepo::mark_read(&pool, first.id, alice).await.unwrap().unwrap();
    assert!(read.is_read);
    let unread = NotificationRepo::list_for_user(&pool, alice, true).await.unwrap();
    assert_eq!(unread.len(), 1);
    assert_eq!(unread[0].notification_type, "info");

    assert_eq!(NotificationRepo::mark_all_read(&pool, alice).await.unwrap(), 1);
    assert_eq!(NotificationRepo::unread_count(&pool, alice).await.unwrap(), 0);
    assert_eq!(NotificationRepo::clear_all(&pool, alice).await.unwrap(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn broadcast_reaches_active_users_except_sender(pool: PgPool) {
    let author = seed_user(&pool, "writer").await;
    let reader = seed_user(&pool, "reader").await;
    let gone = seed_user(&pool, "gone").await;
    UserRepo::deactivate(&pool, gone).await.unwrap();

    let sent = NotificationRepo::broadcast(&pool, &notifications::new_book("Dune"), author)
        .await
        .unwrap();
    assert_eq!(sent, 1);

    let inbox = NotificationRepo::list_for_user(&pool, reader, false).await.unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].notification_type, "info");
    assert_eq!(inbox[0].link.as_deref(), Some("/books"));
    assert_eq!(NotificationRepo::unread_count(&pool, author).await.unwrap(), 0);
    assert_eq!(NotificationRepo::unread_count(&pool, gone).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn revoked_sessions_are_not_found(pool: PgPool) {
    let user = seed_user(&pool, "reader").await;
    let session = SessionRepo::create(
        &pool,
        &CreateSession {
            user_id: user,
            refresh_token_hash: "abc123".to_string(),
            expires_at: Utc::now() + chrono::Duration::days(1),
        },
    )
    .await
    .unwrap();

    assert!(SessionRepo::find_active_by_hash(&pool, "abc123").await.unwrap().is_some());
    assert_eq!(SessionRepo::revoke_all_for_user(&pool, user).await.unwrap(), 1);
    assert!(SessionRepo::find_active_by_hash(&pool, "abc123").await.unwrap().is_none());
    assert!(!SessionRepo::revoke(&pool, session.id).await.unwrap());
}
