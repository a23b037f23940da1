//! Token issuance and validation.
//!
//! Stateless HS256 bearer tokens for a single hardcoded credential pair.
//! Nothing is stored server-side: a token stays valid until its embedded
//! expiry, there is no refresh and no revocation. The credential pair and
//! the fallback secret are observed behavior of the system this replaces
//! and are kept visible on purpose.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::SharedState;

/// The one accepted credential pair. A mismatch in either field yields
/// the same uniform error, so nothing leaks about which field was wrong.
const ADMIN_USERNAME: &str = "admin";
const ADMIN_PASSWORD: &str = "12345";

const TOKEN_TTL_MINUTES: i64 = 30;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the authenticated username.
    pub sub: String,
    /// Absolute expiry, unix seconds.
    pub exp: usize,
}

/// Validated subject, stored in request extensions by [`require_bearer`].
#[derive(Debug, Clone)]
pub struct Subject(pub String);

#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        Self::with_ttl(secret, Duration::minutes(TOKEN_TTL_MINUTES))
    }

    /// Service with a caller-chosen lifetime. Tests use a negative TTL to
    /// mint already-expired tokens.
    pub fn with_ttl(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Check the credential pair and mint a signed token on match.
    pub fn issue(&self, username: &str, password: &str) -> Result<String, AppError> {
        if username != ADMIN_USERNAME || password != ADMIN_PASSWORD {
            return Err(AppError::InvalidCredentials);
        }

        let claims = Claims {
            sub: username.to_string(),
            exp: (Utc::now() + self.ttl).timestamp() as usize,
        };
        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(e.into()))
    }

    /// Verify signature and expiry and return the subject. Any failure —
    /// bad signature, expired, malformed, missing `sub` — collapses to
    /// the same authorization error.
    pub fn verify(&self, token: &str) -> Result<String, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // No clock leeway: a token is invalid the second `exp` passes.
        validation.leeway = 0;

        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|_| AppError::InvalidToken)?;
        Ok(data.claims.sub)
    }
}

/// Middleware: validates `Authorization: Bearer <token>` on protected
/// routes and stores the subject in request extensions for handlers.
pub async fn require_bearer(
    State(state): State<SharedState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .ok_or(AppError::InvalidToken)?;

    let subject = state.tokens.verify(token)?;
    req.extensions_mut().insert(Subject(subject));
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret")
    }

    #[test]
    fn issued_token_verifies_immediately() {
        let svc = service();
        let token = svc.issue("admin", "12345").unwrap();
        assert_eq!(svc.verify(&token).unwrap(), "admin");
    }

    #[test]
    fn wrong_password_and_wrong_user_fail_identically() {
        let svc = service();
        let bad_password = svc.issue("admin", "wrong").unwrap_err();
        let bad_user = svc.issue("root", "12345").unwrap_err();
        assert!(matches!(bad_password, AppError::InvalidCredentials));
        assert!(matches!(bad_user, AppError::InvalidCredentials));
        assert_eq!(bad_password.to_string(), bad_user.to_string());
    }

    #[test]
    fn expired_token_is_rejected() {
        let svc = TokenService::with_ttl("test-secret", Duration::minutes(-5));
        let token = svc.issue("admin", "12345").unwrap();
        assert!(matches!(
            svc.verify(&token).unwrap_err(),
            AppError::InvalidToken
        ));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = TokenService::new("other-secret")
            .issue("admin", "12345")
            .unwrap();
        assert!(matches!(
            service().verify(&token).unwrap_err(),
            AppError::InvalidToken
        ));
    }

    #[test]
    fn token_without_subject_is_rejected() {
        #[derive(Serialize)]
        struct NoSub {
            exp: usize,
        }
        let token = jsonwebtoken::encode(
            &Header::default(),
            &NoSub {
                exp: (Utc::now() + Duration::minutes(5)).timestamp() as usize,
            },
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();
        assert!(matches!(
            service().verify(&token).unwrap_err(),
            AppError::InvalidToken
        ));
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(matches!(
            service().verify("not-a-jwt").unwrap_err(),
            AppError::InvalidToken
        ));
    }
}
