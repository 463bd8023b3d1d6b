/// Auth gateway - registration and login
use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::db::{StoreError, UserStore};
use crate::error::AuthError;
use crate::models::{LoginRequest, NewUser, RegisterRequest, User};
use crate::security::password::{self, PasswordPolicy};
use token_core::TokenService;

pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: Arc<TokenService>,
    policy: PasswordPolicy,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, tokens: Arc<TokenService>, policy: PasswordPolicy) -> Self {
        Self {
            users,
            tokens,
            policy,
        }
    }

    /// Register a new account. Only the salted hash of the password is
    /// stored; the default role is `user`.
    pub async fn register(&self, req: RegisterRequest) -> Result<User, AuthError> {
        req.validate()
            .map_err(|e| AuthError::InvalidInput(e.to_string()))?;
        self.policy.check(&req.password)?;

        let password_hash = password::hash_password(&req.password)?;

        let user = self
            .users
            .insert(NewUser {
                username: req.username,
                email: req.email,
                password_hash,
            })
            .await
            .map_err(|e| match e {
                StoreError::Duplicate => AuthError::DuplicateUser,
                StoreError::Backend(cause) => {
                    tracing::error!(%cause, "user insert failed");
                    AuthError::Internal
                }
            })?;

        tracing::info!(user_id = %user.id, username = %user.username, "user registered");
        Ok(user)
    }

    /// Look up by username or email, check the password, issue a token.
    ///
    /// Unknown identifier and wrong password are indistinguishable to the
    /// caller: both come back as `InvalidCredentials`.
    pub async fn login(&self, req: LoginRequest) -> Result<(User, String), AuthError> {
        if req.identifier.is_empty() || req.password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        let user = self
            .users
            .find_by_identifier(&req.identifier)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "user lookup failed");
                AuthError::Internal
            })?
            .ok_or(AuthError::InvalidCredentials)?;

        password::verify_password(&req.password, &user.password_hash)?;

        let token = self
            .tokens
            .issue(user.id, user.role.as_str())
            .map_err(|e| {
                tracing::error!(error = %e, "token issue failed");
                AuthError::Internal
            })?;

        tracing::debug!(user_id = %user.id, "login succeeded");
        Ok((user, token))
    }

    /// Resolve the account behind a verified identity.
    pub async fn user(&self, id: Uuid) -> Result<User, AuthError> {
        self.users
            .find_by_id(id)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "user lookup failed");
                AuthError::Internal
            })?
            .ok_or_else(|| {
                tracing::error!(user_id = %id, "verified identity has no user record");
                AuthError::Internal
            })
    }
}
