//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep callers (handlers, CLI, tests) decoupled from storage details.

pub mod forum_service;
