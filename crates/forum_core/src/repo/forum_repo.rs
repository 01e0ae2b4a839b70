//! Question/answer repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide the create/read APIs over `questions` and `answers` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Every create issues exactly one `INSERT`; ids come from the store's
//!   autoincrement sequence.
//! - Answer counts are aggregated from `answers` on every read.
//! - Lists are ordered by ascending id (creation order).
//! - Absent rows are `None`, an empty list or `0`, never an error.
//! - An answer for an unknown question is rejected by the foreign key and
//!   surfaced as `RepoError::QuestionNotFound`.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::answer::{Answer, AnswerId};
use crate::model::question::{Question, QuestionId, QuestionSummary};
use rusqlite::{ffi, params, Connection, ErrorCode, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for forum persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error, passed through untranslated.
    Db(DbError),
    /// `create_answer` referenced a question that does not exist.
    QuestionNotFound(QuestionId),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Persisted data cannot be converted to a valid record.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::QuestionNotFound(id) => write!(f, "question not found: {id}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "forum repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "forum repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "forum repository requires column `{column}` in table `{table}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted forum data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::QuestionNotFound(_) => None,
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
            Self::MissingRequiredColumn { .. } => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for question/answer operations.
pub trait ForumRepository {
    /// Inserts a question and returns its new id.
    fn create_question(&self, text: &str) -> RepoResult<QuestionId>;
    /// Lists every question with its current answer count, oldest first.
    fn list_questions(&self) -> RepoResult<Vec<QuestionSummary>>;
    /// Gets one question by id.
    fn get_question(&self, id: QuestionId) -> RepoResult<Option<Question>>;
    /// Inserts an answer linked to `question_id` and returns its new id.
    fn create_answer(&self, question_id: QuestionId, text: &str) -> RepoResult<AnswerId>;
    /// Lists the answers of one question, oldest first.
    fn get_answers(&self, question_id: QuestionId) -> RepoResult<Vec<Answer>>;
    /// Counts the answers of one question.
    fn get_answer_count(&self, question_id: QuestionId) -> RepoResult<u64>;
}

/// SQLite-backed forum repository.
pub struct SqliteForumRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteForumRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_forum_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ForumRepository for SqliteForumRepository<'_> {
    fn create_question(&self, text: &str) -> RepoResult<QuestionId> {
        self.conn
            .execute("INSERT INTO questions (text) VALUES (?1);", [text])?;
        Ok(self.conn.last_insert_rowid())
    }

    fn list_questions(&self) -> RepoResult<Vec<QuestionSummary>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                q.id,
                q.text,
                COUNT(a.id) AS answer_count
             FROM questions q
             LEFT JOIN answers a ON a.question_id = q.id
             GROUP BY q.id, q.text
             ORDER BY q.id ASC;",
        )?;

        let mut rows = stmt.query([])?;
        let mut questions = Vec::new();
        while let Some(row) = rows.next()? {
            questions.push(QuestionSummary {
                id: row.get("id")?,
                text: row.get("text")?,
                answer_count: parse_count(row.get("answer_count")?)?,
            });
        }

        Ok(questions)
    }

    fn get_question(&self, id: QuestionId) -> RepoResult<Option<Question>> {
        let question = self
            .conn
            .query_row(
                "SELECT id, text FROM questions WHERE id = ?1;",
                [id],
                |row| {
                    Ok(Question {
                        id: row.get("id")?,
                        text: row.get("text")?,
                    })
                },
            )
            .optional()?;
        Ok(question)
    }

    fn create_answer(&self, question_id: QuestionId, text: &str) -> RepoResult<AnswerId> {
        match self.conn.execute(
            "INSERT INTO answers (question_id, text) VALUES (?1, ?2);",
            params![question_id, text],
        ) {
            Ok(_) => Ok(self.conn.last_insert_rowid()),
            Err(err) if is_foreign_key_violation(&err) => {
                Err(RepoError::QuestionNotFound(question_id))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn get_answers(&self, question_id: QuestionId) -> RepoResult<Vec<Answer>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, question_id, text
             FROM answers
             WHERE question_id = ?1
             ORDER BY id ASC;",
        )?;

        let mut rows = stmt.query([question_id])?;
        let mut answers = Vec::new();
        while let Some(row) = rows.next()? {
            answers.push(parse_answer_row(row)?);
        }

        Ok(answers)
    }

    fn get_answer_count(&self, question_id: QuestionId) -> RepoResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM answers WHERE question_id = ?1;",
            [question_id],
            |row| row.get(0),
        )?;
        parse_count(count)
    }
}

fn parse_answer_row(row: &Row<'_>) -> RepoResult<Answer> {
    Ok(Answer {
        id: row.get("id")?,
        question_id: row.get("question_id")?,
        text: row.get("text")?,
    })
}

fn parse_count(value: i64) -> RepoResult<u64> {
    u64::try_from(value)
        .map_err(|_| RepoError::InvalidData(format!("negative answer count `{value}`")))
}

fn is_foreign_key_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(
            ffi::Error {
                code: ErrorCode::ConstraintViolation,
                extended_code,
                ..
            },
            _,
        ) if *extended_code == ffi::SQLITE_CONSTRAINT_FOREIGNKEY
    )
}

fn ensure_forum_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let required: [(&'static str, &[&'static str]); 2] = [
        ("questions", &["id", "text"]),
        ("answers", &["id", "question_id", "text"]),
    ];
    for (table, columns) in required {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
        for &column in columns {
            if !table_has_column(conn, table, column)? {
                return Err(RepoError::MissingRequiredColumn { table, column });
            }
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
