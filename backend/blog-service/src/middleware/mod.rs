/// Access control for protected routes
///
/// One explicit stage: the request either yields a verified [`Identity`] or
/// terminates with a 401. Protected handlers take `Identity` as an argument,
/// so none of them can run without this step, and the extractor is the only
/// place downstream code learns who is calling.
use std::future::{ready, Ready};

use actix_web::http::header;
use actix_web::{web, FromRequest, HttpRequest};
use uuid::Uuid;

use crate::error::AccessError;
use crate::models::Role;
use crate::AppState;

/// The verified caller attached to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    pub role: Role,
}

fn identity_from_request(req: &HttpRequest) -> Result<Identity, AccessError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or(AccessError::InvalidToken)?;

    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AccessError::MissingToken)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AccessError::MissingToken)?;

    let claims = state
        .tokens
        .verify(token)
        .map_err(|_| AccessError::InvalidToken)?;

    let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AccessError::InvalidToken)?;
    let role = claims
        .role
        .parse::<Role>()
        .map_err(|_| AccessError::InvalidToken)?;

    Ok(Identity { user_id, role })
}

impl FromRequest for Identity {
    type Error = AccessError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(identity_from_request(req))
    }
}
