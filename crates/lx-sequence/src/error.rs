use lx_core::InvalidRequest;
use lx_network::NetworkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SequenceError {
    #[error(transparent)]
    Invalid(#[from] InvalidRequest),

    #[error("routing error: {0}")]
    Routing(#[from] NetworkError),
}

pub type SequenceResult<T> = Result<T, SequenceError>;
