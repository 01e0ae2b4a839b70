//! Destructive reset of forum rows.
//!
//! Used by callers (mostly test suites) that want a blank store before
//! exercising the model layer. Schema and id sequences are left untouched, so
//! ids handed out after a reset keep increasing.

use super::DbResult;
use log::info;
use rusqlite::Connection;

/// Deletes every answer and every question in one transaction.
///
/// Answers go first because they reference questions.
pub fn reset_db(conn: &mut Connection) -> DbResult<()> {
    let tx = conn.transaction()?;
    let answers = tx.execute("DELETE FROM answers;", [])?;
    let questions = tx.execute("DELETE FROM questions;", [])?;
    tx.commit()?;

    info!(
        "event=db_reset module=db status=ok questions_deleted={questions} answers_deleted={answers}"
    );
    Ok(())
}
