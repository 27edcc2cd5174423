//! Shared domain types for FitCoach.
//!
//! The questionnaire options, the `FormState` record, the country reference
//! list, provider request/response shapes, configuration and error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod config;
pub mod country;
pub mod error;
pub mod form;
pub mod llm;
pub mod options;
