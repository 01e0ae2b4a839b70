//! Core persistence model for a question-and-answer forum.
//!
//! Questions and answers live in SQLite; this crate owns their schema, the
//! repository that reads and writes them, and a thin service on top.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::answer::{Answer, AnswerId};
pub use model::question::{Question, QuestionId, QuestionSummary, QuestionThread};
pub use repo::forum_repo::{ForumRepository, RepoError, RepoResult, SqliteForumRepository};
pub use service::forum_service::ForumService;

/// Minimal health-check API for wiring probes.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
