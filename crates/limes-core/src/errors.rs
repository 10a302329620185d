//! Error taxonomy for extrapolation, series and stencil failures.
//!
//! Every failure carries an [`ErrorInfo`] whose `code` is stable across
//! releases; callers match on the code, humans read the message.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Code, message and the offending inputs of a failed operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Kebab-case identifier such as `order-count-mismatch`.
    pub code: String,
    /// One-line description of what went wrong.
    pub message: String,
    /// Offending values keyed by name (`column`, `beta`, `condition`, ...).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Suggested remedy, when one is obvious.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Payload with an empty context and no hint.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Records `key = value`; numbers are stored in their `Display` form.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Attaches a remedy.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [code: {}]", self.message, self.code)?;
        let mut entries = self.context.iter();
        if let Some((key, value)) = entries.next() {
            write!(f, " ({key}={value}")?;
            for (key, value) in entries {
                write!(f, ", {key}={value}")?;
            }
            write!(f, ")")?;
        }
        match &self.hint {
            Some(hint) => write!(f, "; hint: {hint}"),
            None => Ok(()),
        }
    }
}

/// Failure of a limes operation, grouped by what the caller has to change.
///
/// Numerical trouble is always surfaced here; no operation returns a
/// sentinel value such as zero or infinity in place of an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum LimesError {
    /// Input lengths that do not fit together, e.g. samples against orders.
    #[error("shape error: {0}")]
    Shape(ErrorInfo),
    /// Values outside the operation's domain: zero orders, beta outside `(0, 1]`, NaN.
    #[error("domain error: {0}")]
    Domain(ErrorInfo),
    /// Stencil or fit systems too ill-conditioned to trust.
    #[error("singular system: {0}")]
    Singular(ErrorInfo),
    /// Series iteration cap reached while the caller asked for failure.
    #[error("convergence error: {0}")]
    Convergence(ErrorInfo),
    /// Option structs that fail validation.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// JSON or YAML encoding and decoding.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl LimesError {
    /// Payload shared by every variant.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            LimesError::Shape(info)
            | LimesError::Domain(info)
            | LimesError::Singular(info)
            | LimesError::Convergence(info)
            | LimesError::Config(info)
            | LimesError::Serde(info) => info,
        }
    }

    /// Stable code of the payload.
    pub fn code(&self) -> &str {
        &self.info().code
    }
}
