//! Question records.
//!
//! # Invariants
//! - `QuestionSummary::answer_count` equals the number of answers linked to
//!   the question at the moment it was read.
//! - `QuestionThread::answers` is ordered by ascending answer id.

use crate::model::answer::Answer;
use serde::{Deserialize, Serialize};

/// Store-assigned question id, increasing in creation order.
pub type QuestionId = i64;

/// A question as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    /// Question body exactly as supplied at creation.
    pub text: String,
}

/// Listing row: a question plus its derived answer count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSummary {
    pub id: QuestionId,
    pub text: String,
    /// Aggregated from `answers` at read time.
    pub answer_count: u64,
}

/// A question together with its full answer thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionThread {
    pub question: Question,
    pub answers: Vec<Answer>,
}

impl QuestionThread {
    /// Number of answers in this thread.
    pub fn answer_count(&self) -> u64 {
        self.answers.len() as u64
    }

    /// Projects the thread into its listing row.
    pub fn summary(&self) -> QuestionSummary {
        QuestionSummary {
            id: self.question.id,
            text: self.question.text.clone(),
            answer_count: self.answer_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Question, QuestionThread};
    use crate::model::answer::Answer;

    #[test]
    fn thread_summary_counts_answers() {
        let thread = QuestionThread {
            question: Question {
                id: 7,
                text: "Capital of France?".to_string(),
            },
            answers: vec![
                Answer {
                    id: 1,
                    question_id: 7,
                    text: "Paris".to_string(),
                },
                Answer {
                    id: 2,
                    question_id: 7,
                    text: "paris".to_string(),
                },
            ],
        };

        let summary = thread.summary();
        assert_eq!(summary.id, 7);
        assert_eq!(summary.text, "Capital of France?");
        assert_eq!(summary.answer_count, 2);
    }

    #[test]
    fn empty_thread_has_zero_count() {
        let thread = QuestionThread {
            question: Question {
                id: 1,
                text: "anyone?".to_string(),
            },
            answers: Vec::new(),
        };
        assert_eq!(thread.answer_count(), 0);
    }
}
