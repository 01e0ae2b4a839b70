//! Answer records.

use crate::model::question::QuestionId;
use serde::{Deserialize, Serialize};

/// Store-assigned answer id; a sequence independent from question ids.
pub type AnswerId = i64;

/// An answer attached to exactly one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub id: AnswerId,
    pub question_id: QuestionId,
    pub text: String,
}
