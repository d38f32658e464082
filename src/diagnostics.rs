//! Structured diagnostics for pubspec convention checks.
//!
//! Every diagnostic is a policy failure: a package passes only when its
//! validation produced none. Codes are stable so JSON consumers can match
//! on them instead of on message text.

use std::fmt;

use serde::Serialize;

/// A single detected problem in a package's pubspec.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Stable code (e.g., `"E000"`, `"O001"`, `"R001"`).
    pub code: &'static str,
    /// Human-readable message. May span several lines.
    pub message: String,
    /// Top-level key that caused the diagnostic (e.g., `"repository"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
    /// Suggested fix (actionable text).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic with the given code and message.
    #[must_use]
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            field: None,
            suggestion: None,
        }
    }

    /// Set the field that caused this diagnostic.
    #[must_use]
    pub fn with_field(mut self, field: &'static str) -> Self {
        self.field = Some(field);
        self
    }

    /// Set a suggested fix for this diagnostic.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

// ── Code constants ──────────────────────────────────────────────────────

/// pubspec.yaml could not be read or parsed.
pub const E000: &str = "E000";

/// Major sections are out of canonical order.
pub const O001: &str = "O001";

// Publish policy (R001–R004)

/// Missing `repository` entry.
pub const R001: &str = "R001";
/// `repository` link does not end with the package name.
pub const R002: &str = "R002";
/// `homepage` entry present.
pub const R003: &str = "R003";
/// `issue_tracker` link missing or not in the required format.
pub const R004: &str = "R004";
