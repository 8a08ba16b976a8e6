use lx_core::InvalidRequest;
use lx_cost::CostError;
use lx_network::NetworkError;
use lx_sequence::SequenceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Cost(#[from] CostError),

    #[error(transparent)]
    Sequence(#[from] SequenceError),

    #[error(transparent)]
    Invalid(#[from] InvalidRequest),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification for the request boundary, e.g. to pick an HTTP
/// status in an outer layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnknownCity,
    InvalidRequest,
    NoRouteFound,
    /// Bad static data: config files, vehicle tables, network files.
    Config,
    Io,
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Network(e) => network_kind(e),
            ServiceError::Cost(CostError::Invalid(_)) => ErrorKind::InvalidRequest,
            ServiceError::Sequence(SequenceError::Invalid(_)) => ErrorKind::InvalidRequest,
            ServiceError::Sequence(SequenceError::Routing(e)) => network_kind(e),
            ServiceError::Invalid(_) => ErrorKind::InvalidRequest,
            ServiceError::Config(_) | ServiceError::Json(_) => ErrorKind::Config,
            ServiceError::Io(_) => ErrorKind::Io,
        }
    }

    /// The offending request field, when the error is an invalid request.
    pub fn invalid_request(&self) -> Option<&InvalidRequest> {
        match self {
            ServiceError::Network(NetworkError::Invalid(e))
            | ServiceError::Cost(CostError::Invalid(e))
            | ServiceError::Sequence(SequenceError::Invalid(e))
            | ServiceError::Sequence(SequenceError::Routing(NetworkError::Invalid(e)))
            | ServiceError::Invalid(e) => Some(e),
            _ => None,
        }
    }
}

fn network_kind(e: &NetworkError) -> ErrorKind {
    match e {
        NetworkError::UnknownCity(_) => ErrorKind::UnknownCity,
        NetworkError::NoRoute { .. } => ErrorKind::NoRouteFound,
        NetworkError::Invalid(_) => ErrorKind::InvalidRequest,
        NetworkError::Io(_) => ErrorKind::Io,
        NetworkError::DuplicateCity(_)
        | NetworkError::DuplicateRoad { .. }
        | NetworkError::Build(_)
        | NetworkError::Parse(_) => ErrorKind::Config,
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
