use thiserror::Error;

use crate::{duration::ParseError, sunset::SunsetError};

/// Everything a service operation can fail with.
///
/// The HTTP layer maps each variant onto a status code in `api::errors`.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Upstream(#[from] SunsetError),

    #[error("{0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Store(#[from] sqlx::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
