/// Authentication handlers
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{AuthError, ErrorBody};
use crate::middleware::Identity;
use crate::models::{LoginRequest, RegisterRequest, Role, User};
use crate::services::AuthService;
use crate::AppState;

/// Public view of an account.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Login response with the session token
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub user_id: Uuid,
    pub username: String,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

fn service(state: &AppState) -> AuthService {
    AuthService::new(state.users.clone(), state.tokens.clone(), state.policy)
}

/// Register endpoint handler
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = UserProfile),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 409, description = "Username or email taken", body = ErrorBody)
    )
)]
pub async fn register(
    state: web::Data<AppState>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AuthError> {
    let user = service(&state).register(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(UserProfile::from(user)))
}

/// Login endpoint handler
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorBody)
    )
)]
pub async fn login(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AuthError> {
    let (user, token) = service(&state).login(payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        user_id: user.id,
        username: user.username,
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: state.tokens.ttl_secs(),
    }))
}

/// Current account endpoint handler
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Current account", body = UserProfile),
        (status = 401, description = "Unauthorized", body = ErrorBody)
    )
)]
pub async fn me(state: web::Data<AppState>, identity: Identity) -> Result<HttpResponse, AuthError> {
    let user = service(&state).user(identity.user_id).await?;
    Ok(HttpResponse::Ok().json(UserProfile::from(user)))
}
