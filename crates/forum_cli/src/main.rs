//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `forum_core` linkage and store bootstrap from a plain executable.
//! - Print the question listing of a database file (or an empty in-memory
//!   store when no path is given).
//!
//! Usage: `forum_cli [DB_PATH]`. Set `FORUM_LOG_DIR` to an absolute directory
//! to enable file logging.

use forum_core::db::{open_db, open_db_in_memory};
use forum_core::{default_log_level, init_logging, ForumService, SqliteForumRepository};
use log::warn;
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Ok(log_dir) = std::env::var("FORUM_LOG_DIR") {
        if let Err(err) = init_logging(default_log_level(), &log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    match run(std::env::args().nth(1)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            warn!("event=cli_run module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(db_path: Option<String>) -> Result<(), Box<dyn Error>> {
    println!("forum_core ping={}", forum_core::ping());
    println!("forum_core version={}", forum_core::core_version());

    let conn = match db_path.as_deref() {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };
    let service = ForumService::new(SqliteForumRepository::try_new(&conn)?);

    let questions = service.list_questions()?;
    println!("questions={}", questions.len());
    for question in questions {
        println!(
            "#{} [{} answers] {}",
            question.id, question.answer_count, question.text
        );
    }
    Ok(())
}
