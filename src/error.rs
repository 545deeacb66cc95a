// src/error.rs

//! Unified error handling for the library portals.

use std::fmt;

use thiserror::Error;

use crate::pipeline::validate::FieldErrors;

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// One or more form fields were rejected
    #[error("Form has {} invalid field(s): {}", .0.len(), .0)]
    Form(FieldErrors),

    /// Login rejected. Deliberately carries no reason.
    #[error("Login failed: invalid credentials")]
    LoginFailed,

    /// A referenced record does not exist
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    /// No copies left to lend
    #[error("\"{0}\" is currently not available")]
    Unavailable(String),

    /// A borrow, renew or return rule was violated
    #[error("Circulation error: {0}")]
    Circulation(String),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a not-found error for a record kind and id.
    pub fn not_found(kind: &'static str, id: impl fmt::Display) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// Create a circulation rule error.
    pub fn circulation(message: impl Into<String>) -> Self {
        Self::Circulation(message.into())
    }
}
