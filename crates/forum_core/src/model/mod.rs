//! Forum domain model.
//!
//! # Responsibility
//! - Define the plain records the repository maps rows into.
//!
//! # Invariants
//! - Ids are assigned by the store and never reused.
//! - `answer_count` is never stored; it is computed when a question is read.

pub mod answer;
pub mod question;
