//! Error types for the response engine.

use thiserror::Error;

/// Response engine error type.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Invalid configuration or unsupported values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// A rule or filter pattern failed to compile.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
    /// A rule was registered without any reply templates.
    #[error("rule {0} has no reply templates")]
    EmptyTemplateSet(&'static str),
    /// A reply template contains the segment separator, which is reserved
    /// for joining independent segments.
    #[error("rule {0} has a template containing the segment separator")]
    SeparatorInTemplate(&'static str),
}

/// Convenience result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
