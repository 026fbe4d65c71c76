//! @acp:module "Errors"
//! @acp:summary "Crate error type and Result alias"
//! @acp:domain cli
//! @acp:layer types
//!
//! The scoring core never fails on well-typed input; everything here comes from
//! configuration, catalog integrity, session edits or file I/O.

use thiserror::Error;

use crate::catalog::{OptionId, QuestionId};

/// Main error type for advisor operations
#[derive(Error, Debug)]
pub enum AdvisorError {
    /// File could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML (de)serialization failed
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Invalid configuration (negative margin, unknown scoring method)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog violates an integrity rule
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Question id not present in the catalog
    #[error("Unknown question: {0}")]
    UnknownQuestion(QuestionId),

    /// Answer option id not present in the catalog
    #[error("Unknown answer option: {0}")]
    UnknownOption(OptionId),

    /// Answer rejected for the question it was given to
    #[error("Invalid answer: {0}")]
    InvalidAnswer(String),

    /// Case field rejected (empty name, malformed date)
    #[error("Invalid case information: {0}")]
    InvalidCase(String),

    /// Report template failed to register or render
    #[error("Template error: {0}")]
    Template(String),
}

impl From<handlebars::TemplateError> for AdvisorError {
    fn from(err: handlebars::TemplateError) -> Self {
        AdvisorError::Template(err.to_string())
    }
}

impl From<handlebars::RenderError> for AdvisorError {
    fn from(err: handlebars::RenderError) -> Self {
        AdvisorError::Template(err.to_string())
    }
}

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, AdvisorError>;
