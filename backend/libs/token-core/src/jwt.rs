/// JWT issue/verify for blog platform sessions
///
/// Tokens are HS256-signed and time-bounded. The signing secret comes from
/// configuration and is wrapped into a [`TokenService`] at startup; the
/// service is then a pure function over that key material.
///
/// Verification is deliberately uniform: a malformed token, a bad signature
/// and an expired token all come back as the same [`TokenError::Invalid`],
/// so a caller cannot learn which check failed.
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Claims carried by a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID as UUID string)
    pub sub: String,
    /// Role name ("user" or "admin")
    pub role: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("invalid token")]
    Invalid,
    #[error("token signing failed")]
    Signing,
}

/// Issues and verifies signed session tokens.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl TokenService {
    /// Build a service from the configuration-provided secret and token
    /// lifetime in seconds.
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
            ttl_secs,
        }
    }

    /// Token lifetime this service issues, in seconds.
    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    /// Produce a signed, time-bounded token for the given identity.
    pub fn issue(&self, user_id: Uuid, role: &str) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.ttl_secs)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|_| TokenError::Signing)
    }

    /// Verify a token and return its claims.
    ///
    /// Every failure mode maps to [`TokenError::Invalid`].
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| TokenError::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret-key";

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let service = TokenService::new(SECRET, 3600);
        let user_id = Uuid::new_v4();

        let token = service.issue(user_id, "user").unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.role, "user");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_tampered_token_rejected() {
        let service = TokenService::new(SECRET, 3600);
        let token = service.issue(Uuid::new_v4(), "user").unwrap();

        // Alter the claims segment; the signature no longer matches.
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        let mut payload: Vec<char> = parts[1].chars().collect();
        payload[0] = if payload[0] == 'e' { 'f' } else { 'e' };
        parts[1] = payload.into_iter().collect();
        let tampered = parts.join(".");

        assert_eq!(service.verify(&tampered), Err(TokenError::Invalid));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = TokenService::new(SECRET, 3600);
        let verifier = TokenService::new("a-different-secret", 3600);

        let token = issuer.issue(Uuid::new_v4(), "admin").unwrap();
        assert_eq!(verifier.verify(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_expired_token_rejected() {
        // Negative TTL puts the expiry far enough in the past to clear the
        // default validation leeway.
        let service = TokenService::new(SECRET, -120);
        let token = service.issue(Uuid::new_v4(), "user").unwrap();

        assert_eq!(service.verify(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_malformed_token_rejected() {
        let service = TokenService::new(SECRET, 3600);
        assert_eq!(service.verify("not-a-token"), Err(TokenError::Invalid));
    }

    #[test]
    fn test_rejection_is_uniform() {
        let service = TokenService::new(SECRET, -120);
        let expired = service.issue(Uuid::new_v4(), "user").unwrap();

        let expired_err = service.verify(&expired).unwrap_err();
        let garbage_err = service.verify("garbage").unwrap_err();

        assert_eq!(expired_err, garbage_err);
        assert_eq!(expired_err.to_string(), garbage_err.to_string());
    }
}
