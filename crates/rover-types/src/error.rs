//! Syntax diagnostics.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A syntax error recovered by the parser.
///
/// Parsing never fails outright: each malformed statement is dropped and
/// reported as one of these. The struct is serializable so a browser or
/// editor host can render diagnostics from a JSON boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("line {line}: {message}")]
pub struct SyntaxError {
    /// 1-based source line the error was detected on.
    pub line: u32,
    /// Human-readable description.
    pub message: String,
}

impl SyntaxError {
    /// Create a new syntax error.
    pub fn new(line: u32, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}
