//! Forum use-case service.
//!
//! # Responsibility
//! - Provide stable question/answer entry points for core callers.
//! - Assemble a question with its answers into one thread report.
//!
//! # Invariants
//! - Service APIs never bypass repository persistence contracts.
//! - Service layer remains storage-agnostic and stateless between calls.

use crate::model::answer::{Answer, AnswerId};
use crate::model::question::{Question, QuestionId, QuestionSummary, QuestionThread};
use crate::repo::forum_repo::{ForumRepository, RepoResult};
use log::debug;

/// Use-case service wrapper for forum operations.
pub struct ForumService<R: ForumRepository> {
    repo: R,
}

impl<R: ForumRepository> ForumService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Posts a new question; it starts with zero answers.
    pub fn create_question(&self, text: &str) -> RepoResult<QuestionId> {
        let id = self.repo.create_question(text)?;
        debug!("event=question_create module=service status=ok question_id={id}");
        Ok(id)
    }

    /// Lists all questions with live answer counts, oldest first.
    pub fn list_questions(&self) -> RepoResult<Vec<QuestionSummary>> {
        self.repo.list_questions()
    }

    /// Gets one question; `None` when the id was never assigned.
    pub fn get_question(&self, id: QuestionId) -> RepoResult<Option<Question>> {
        self.repo.get_question(id)
    }

    /// Posts an answer to an existing question.
    ///
    /// # Errors
    /// - `RepoError::QuestionNotFound` when `question_id` does not exist.
    pub fn create_answer(&self, question_id: QuestionId, text: &str) -> RepoResult<AnswerId> {
        match self.repo.create_answer(question_id, text) {
            Ok(id) => {
                debug!(
                    "event=answer_create module=service status=ok question_id={question_id} answer_id={id}"
                );
                Ok(id)
            }
            Err(err) => {
                debug!(
                    "event=answer_create module=service status=error question_id={question_id} error={err}"
                );
                Err(err)
            }
        }
    }

    /// Lists the answers of a question, oldest first.
    pub fn get_answers(&self, question_id: QuestionId) -> RepoResult<Vec<Answer>> {
        self.repo.get_answers(question_id)
    }

    /// Counts the answers of a question; `0` for unknown ids.
    pub fn get_answer_count(&self, question_id: QuestionId) -> RepoResult<u64> {
        self.repo.get_answer_count(question_id)
    }

    /// Loads a question together with its full answer thread.
    ///
    /// Returns `None` when the question does not exist.
    pub fn get_question_thread(&self, id: QuestionId) -> RepoResult<Option<QuestionThread>> {
        let Some(question) = self.repo.get_question(id)? else {
            return Ok(None);
        };
        let answers = self.repo.get_answers(question.id)?;
        Ok(Some(QuestionThread { question, answers }))
    }
}
