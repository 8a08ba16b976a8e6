//! Network-subsystem error type.

use thiserror::Error;

use lx_core::InvalidRequest;

/// Errors produced by `lx-network`.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("unknown city {0:?}")]
    UnknownCity(String),

    #[error("no route from {from} to {to}")]
    NoRoute { from: String, to: String },

    #[error(transparent)]
    Invalid(#[from] InvalidRequest),

    #[error("city {0:?} is already in the network")]
    DuplicateCity(String),

    #[error("road {a} - {b} is already in the network")]
    DuplicateRoad { a: String, b: String },

    #[error("network build error: {0}")]
    Build(String),

    #[error("network parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
