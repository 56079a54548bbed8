//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod book_repo;
pub mod history_repo;
pub mod notification_repo;
pub mod question_repo;
pub mod session_repo;
pub mod user_repo;

pub use book_repo::BookRepo;
pub use history_repo::HistoryRepo;
pub use notification_repo::NotificationRepo;
pub use question_repo::QuestionRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
