//! Request-validation error shared by every `lx-*` crate.
//!
//! Each crate keeps its own error enum and wraps [`InvalidRequest`] as one
//! variant via `#[from]`, so the request boundary sees a single payload shape
//! for "the caller sent something unusable".

use thiserror::Error;

/// A request parameter failed validation.
///
/// Carries the offending field and value so the caller can build a
/// user-facing message without re-parsing the error string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field} {value:?}: {reason}")]
pub struct InvalidRequest {
    pub field:  &'static str,
    pub value:  String,
    pub reason: &'static str,
}

impl InvalidRequest {
    pub fn new(field: &'static str, value: impl ToString, reason: &'static str) -> Self {
        Self { field, value: value.to_string(), reason }
    }
}

/// Return `value` if it is finite and strictly positive.
///
/// Zero, negatives, NaN and infinities are all rejected.
pub fn require_positive(field: &'static str, value: f64) -> Result<f64, InvalidRequest> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(InvalidRequest::new(field, value, "must be a positive finite number"))
    }
}
