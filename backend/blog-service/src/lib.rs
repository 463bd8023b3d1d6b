/// Blog Service Library
///
/// A single service covering authentication and post/comment content for the
/// blog platform.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers
/// - `models`: Users, posts, embedded comments and request DTOs
/// - `services`: Business logic layer (auth gateway, post service)
/// - `db`: Store traits plus Postgres and in-memory implementations
/// - `media`: External image-host collaborator
/// - `middleware`: Access-control stage that turns a bearer token into an identity
/// - `security`: Password hashing and policy
/// - `error`: Error types and HTTP mapping
/// - `config`: Configuration management
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod media;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod routes;
pub mod security;
pub mod services;
pub mod telemetry;

use std::sync::Arc;

pub use config::Config;
pub use error::{AccessError, AuthError, PostError};

use crate::db::{PostStore, UserStore};
use crate::media::ImageHost;
use crate::security::password::PasswordPolicy;
use token_core::TokenService;

/// Shared application state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub posts: Arc<dyn PostStore>,
    pub images: Arc<dyn ImageHost>,
    pub tokens: Arc<TokenService>,
    pub policy: PasswordPolicy,
}
