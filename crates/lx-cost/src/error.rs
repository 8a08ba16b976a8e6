use lx_core::InvalidRequest;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CostError {
    #[error(transparent)]
    Invalid(#[from] InvalidRequest),
}

pub type CostResult<T> = Result<T, CostError>;
