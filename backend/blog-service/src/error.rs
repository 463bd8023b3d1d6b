/// Error types for the blog service
///
/// Each component exposes a closed set of failures; the transport layer maps
/// them to status codes here. Store internals never reach a response body:
/// backend failures are logged where they are wrapped and surface as a
/// generic internal error.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// JSON body returned for every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    pub status: u16,
}

fn error_response(status: StatusCode, error: impl ToString) -> HttpResponse {
    HttpResponse::build(status).json(ErrorBody {
        error: error.to_string(),
        status: status.as_u16(),
    })
}

/// Failures of the auth gateway (registration and login).
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("username or email already registered")]
    DuplicateUser,

    /// One generic error for unknown identifier and wrong password alike.
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("internal error")]
    Internal,
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AuthError::DuplicateUser => StatusCode::CONFLICT,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        error_response(self.status_code(), self)
    }
}

/// Rejections of the access-control stage.
///
/// Both variants render the same 401 body so a caller cannot tell a missing
/// header from a failed verification.
#[derive(Debug, Error)]
pub enum AccessError {
    #[error("unauthorized")]
    MissingToken,

    #[error("unauthorized")]
    InvalidToken,
}

impl ResponseError for AccessError {
    fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> HttpResponse {
        error_response(self.status_code(), self)
    }
}

/// Failures of the post service.
#[derive(Debug, Error)]
pub enum PostError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("post not found")]
    NotFound,

    #[error("not allowed to modify this post")]
    Forbidden,

    #[error("image upload failed")]
    ImageHost,

    #[error("internal error")]
    Internal,
}

impl ResponseError for PostError {
    fn status_code(&self) -> StatusCode {
        match self {
            PostError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            PostError::NotFound => StatusCode::NOT_FOUND,
            PostError::Forbidden => StatusCode::FORBIDDEN,
            PostError::ImageHost => StatusCode::BAD_GATEWAY,
            PostError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        error_response(self.status_code(), self)
    }
}
