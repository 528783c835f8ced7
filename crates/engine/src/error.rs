//! The module contains the errors the engine can throw.
//!
//! The errors are:
//!
//! - [`Validation`] thrown when a draft misses a required field.
//! - [`KeyNotFound`] thrown when a record is not found.
//! - [`InvalidAmount`] thrown when a price cannot be parsed or is negative.
//! - [`Storage`] thrown when the blob store cannot be written.
//!
//! Failures of the AI collaborator live in [`AssistantError`]: they are
//! always recoverable and never mixed with store errors.
//!
//!  [`Validation`]: EngineError::Validation
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`Storage`]: EngineError::Storage
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid value: {0}")]
    InvalidValue(String),
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidValue(a), Self::InvalidValue(b)) => a == b,
            (Self::Storage(a), Self::Storage(b)) => a.kind() == b.kind(),
            (Self::Json(a), Self::Json(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}

/// Failures of the generative-AI collaborator.
///
/// Every variant is recoverable: front ends turn it into a transient notice
/// and the user may retry by hand.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssistantError {
    #[error("assistant is not configured: {0}")]
    NotConfigured(String),
    #[error("assistant unavailable: {0}")]
    Unavailable(String),
    #[error("assistant returned an empty response")]
    EmptyResponse,
    #[error("assistant returned a malformed response: {0}")]
    Malformed(String),
    #[error("could not recognize content")]
    Unrecognized,
    #[error("invalid image: {0}")]
    InvalidImage(String),
    #[error("nothing to parse")]
    EmptyInput,
    #[error("no records to summarize")]
    NothingToSummarize,
}
