use actix_web::http::StatusCode;
use actix_web::ResponseError;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the invitation domain, storage and outbound clients
#[derive(Debug, Error)]
pub enum Error {
    // Parsing errors
    #[error("{0}")]
    ParsingError(String),
    // Lookup errors
    #[error("Invitation '{0}' does not exist")]
    NotFound(String),
    // Invitation data errors
    #[error("Failed to read invitation data: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode invitation data: {0}")]
    Json(#[from] serde_json::Error),
    // RSVP action client errors
    #[error("Failed to reach the RSVP action: {0}")]
    RemoteAction(#[from] reqwest::Error),
    // Database errors
    #[error(transparent)]
    DatabaseError(#[from] sqlx::Error),
}

pub type RestResult<T> = std::result::Result<T, RestError>;

#[derive(Debug, Error)]
pub enum RestError {
    #[error("Parse Error: {0}")]
    ParseError(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Internal Server Error: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<Error> for RestError {
    fn from(e: Error) -> Self {
        match e {
            Error::ParsingError(msg) => Self::ParseError(msg),
            Error::NotFound(id) => Self::NotFound(format!("invitation {}", id)),
            Error::Io(e) => {
                tracing::error!(error.cause_chain = ?e, "Failed to read invitation data");
                Self::InternalError("Invitation storage".into())
            }
            Error::Json(e) => {
                tracing::error!(error.cause_chain = ?e, "Stored invitation is malformed");
                Self::InternalError("Invitation storage".into())
            }
            Error::RemoteAction(e) => {
                tracing::error!(error.cause_chain = ?e, "RSVP action request failed");
                Self::InternalError("RSVP action".into())
            }
            Error::DatabaseError(e) => {
                tracing::error!(error.cause_chain = ?e, "Database error");
                Self::InternalError("Database error".into())
            }
        }
    }
}

impl ResponseError for RestError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ParseError(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InternalError(_) | Self::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
