use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config;
use crate::error::ApiError;
use crate::models::Role;

/// TTL for tokens handed out by the bearer endpoint. Fixed at 24h; the
/// cookie flow uses the configured `jwt_expires_in` instead, so the two
/// entry points intentionally do not share a window.
pub fn bearer_ttl() -> Duration {
    Duration::hours(24)
}

/// TTL for the cookie login/register flow, from configuration.
/// Falls back to one week when the configured string does not parse.
pub fn session_ttl() -> Duration {
    parse_ttl(&config::config().security.jwt_expires_in).unwrap_or_else(|| Duration::days(7))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: Uuid,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(user_id: Uuid, role: Role, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            role,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("JWT signing secret is not configured")]
    MissingSecret,

    #[error("failed to sign token: {0}")]
    Signing(jsonwebtoken::errors::Error),

    #[error("invalid token: {0}")]
    Invalid(jsonwebtoken::errors::Error),
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Invalid(_) => ApiError::invalid_token("Invalid token"),
            other => {
                tracing::error!("token service failure: {}", other);
                ApiError::internal("Authentication is unavailable")
            }
        }
    }
}

/// Issue a signed token for the given user and role using the configured secret.
pub fn issue(user_id: Uuid, role: Role, ttl: Duration) -> Result<String, TokenError> {
    issue_with_secret(&config::config().security.jwt_secret, user_id, role, ttl)
}

/// Verify signature and expiry, returning the decoded claims.
pub fn verify(token: &str) -> Result<Claims, TokenError> {
    verify_with_secret(&config::config().security.jwt_secret, token)
}

pub fn issue_with_secret(
    secret: &str,
    user_id: Uuid,
    role: Role,
    ttl: Duration,
) -> Result<String, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let claims = Claims::new(user_id, role, ttl);
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(TokenError::Signing)
}

pub fn verify_with_secret(secret: &str, token: &str) -> Result<Claims, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(TokenError::Invalid)?;

    Ok(data.claims)
}

/// Parse a TTL string of the form `90s`, `15m`, `24h` or `7d`.
/// A bare number is taken as seconds.
pub fn parse_ttl(s: &str) -> Option<Duration> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let (value, unit) = match s.chars().last() {
        Some(c) if c.is_ascii_alphabetic() => (&s[..s.len() - 1], Some(c)),
        _ => (s, None),
    };
    let n: i64 = value.parse().ok().filter(|n| *n > 0)?;

    match unit {
        None | Some('s') => Some(Duration::seconds(n)),
        Some('m') => Some(Duration::minutes(n)),
        Some('h') => Some(Duration::hours(n)),
        Some('d') => Some(Duration::days(n)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn round_trip_carries_user_and_role() {
        let user_id = Uuid::new_v4();
        let token =
            issue_with_secret(SECRET, user_id, Role::Manager, Duration::hours(1)).unwrap();
        let claims = verify_with_secret(SECRET, &token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, Role::Manager);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn expired_token_fails() {
        // Well past jsonwebtoken's default leeway
        let token =
            issue_with_secret(SECRET, Uuid::new_v4(), Role::Employee, Duration::hours(-2))
                .unwrap();
        assert!(matches!(
            verify_with_secret(SECRET, &token),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn wrong_secret_fails() {
        let token =
            issue_with_secret(SECRET, Uuid::new_v4(), Role::Hr, Duration::hours(1)).unwrap();
        assert!(verify_with_secret("other-secret", &token).is_err());
    }

    #[test]
    fn malformed_token_fails() {
        assert!(verify_with_secret(SECRET, "not.a.jwt").is_err());
        assert!(verify_with_secret(SECRET, "").is_err());
    }

    #[test]
    fn empty_secret_fails_closed() {
        assert!(matches!(
            issue_with_secret("", Uuid::new_v4(), Role::Hr, Duration::hours(1)),
            Err(TokenError::MissingSecret)
        ));
    }

    #[test]
    fn ttl_strings_parse() {
        assert_eq!(parse_ttl("90s"), Some(Duration::seconds(90)));
        assert_eq!(parse_ttl("15m"), Some(Duration::minutes(15)));
        assert_eq!(parse_ttl("24h"), Some(Duration::hours(24)));
        assert_eq!(parse_ttl("7d"), Some(Duration::days(7)));
        assert_eq!(parse_ttl("3600"), Some(Duration::seconds(3600)));
        assert_eq!(parse_ttl("1w"), None);
        assert_eq!(parse_ttl("-5h"), None);
        assert_eq!(parse_ttl(""), None);
    }
}
