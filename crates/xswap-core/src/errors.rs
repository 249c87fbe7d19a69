//! Structured error types shared across XSwap crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`XswapError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (edges, bounds, sizes, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the XSwap engine.
///
/// `OutOfRange`, `Duplicate`, `NotFound` and `BudgetExceeded` are fatal to a run: they
/// describe a violated invariant between the edge collection, the declared node bounds
/// and the membership index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum XswapError {
    /// An edge lies outside the identifier domain declared at construction.
    #[error("out of range: {0}")]
    OutOfRange(ErrorInfo),
    /// An edge was added while already present.
    #[error("duplicate edge: {0}")]
    Duplicate(ErrorInfo),
    /// An edge was removed while absent.
    #[error("edge not found: {0}")]
    NotFound(ErrorInfo),
    /// No membership backend fits the declared domain within the memory budget.
    #[error("memory budget exceeded: {0}")]
    BudgetExceeded(ErrorInfo),
    /// Malformed caller input.
    #[error("input error: {0}")]
    Input(ErrorInfo),
    /// Serialization, parsing and file errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl XswapError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            XswapError::OutOfRange(info)
            | XswapError::Duplicate(info)
            | XswapError::NotFound(info)
            | XswapError::BudgetExceeded(info)
            | XswapError::Input(info)
            | XswapError::Serde(info) => info,
        }
    }
}
