use poem::http::StatusCode;
use tracing::error;

use crate::domain::errors::DomainError;

pub fn domain_error(err: DomainError) -> poem::Error {
    let status = match &err {
        DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::Other(inner) => {
            error!(error = ?inner, "request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    poem::Error::from_string(err.to_string(), status)
}
