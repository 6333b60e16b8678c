//! Error handling types for target-pipeline
//!
//! This module provides the error type every stage and resolver reports.

use thiserror::Error;

/// Failure of a pipeline run.
///
/// Any error aborts the whole fold. Selections are immutable values, so
/// there is nothing to roll back.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Descriptor value outside the shape a stage recognizes
    #[error("Invalid descriptor: {message}")]
    InvalidDescriptor { message: String },

    /// Selection violates the selection invariants
    #[error("Malformed selection: {message}")]
    MalformedSelection { message: String },

    /// Selection was built without its content range
    #[error("Selection has no content range")]
    MissingContentRange,

    /// No token recorded under the requested hat
    #[error("No token under hat: style {style}, character '{character}'")]
    HatNotFound { style: String, character: char },

    /// Mark resolved to no selections
    #[error("Mark has no selections: {mark}")]
    EmptyMark { mark: String },

    /// Range target endpoints live in different documents
    #[error("Range endpoints refer to different documents: {anchor} and {active}")]
    MixedEditors { anchor: String, active: String },

    /// Configuration error
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

impl PipelineError {
    /// Create an invalid descriptor error
    pub fn invalid_descriptor(message: impl Into<String>) -> Self {
        PipelineError::InvalidDescriptor {
            message: message.into(),
        }
    }

    /// Create a malformed selection error
    pub fn malformed_selection(message: impl Into<String>) -> Self {
        PipelineError::MalformedSelection {
            message: message.into(),
        }
    }

    /// Create a hat-not-found error
    pub fn hat_not_found(style: impl Into<String>, character: char) -> Self {
        PipelineError::HatNotFound {
            style: style.into(),
            character,
        }
    }

    /// Create an empty mark error
    pub fn empty_mark(mark: impl Into<String>) -> Self {
        PipelineError::EmptyMark { mark: mark.into() }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        PipelineError::Config {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        PipelineError::Internal(message.into())
    }

    /// Whether the error stems from a broken upstream contract rather than
    /// from user input.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            PipelineError::MalformedSelection { .. }
                | PipelineError::MissingContentRange
                | PipelineError::Internal(_)
        )
    }
}
