use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use crate::auth::cookie::AUTH_COOKIE;
use crate::auth::token;
use crate::error::ApiError;
use crate::models::Role;

/// Authenticated caller context, decoded from the request's token.
///
/// Implemented as an extractor so each handler states its own allow-list
/// with `require_role` instead of re-implementing the extract/verify/compare
/// sequence per route.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: Role,
}

impl AuthUser {
    /// Compare the caller's role against a route's allow-list.
    pub fn require_role(&self, allowed: &[Role]) -> Result<(), ApiError> {
        if allowed.contains(&self.role) {
            return Ok(());
        }
        let wanted = allowed
            .iter()
            .map(Role::as_str)
            .collect::<Vec<_>>()
            .join(" or ");
        Err(ApiError::forbidden(format!(
            "Unauthorized - {} access required",
            wanted
        )))
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = extract_token(&parts.headers)
            .ok_or_else(|| ApiError::unauthorized("Unauthorized"))?;

        let claims = token::verify(&token).map_err(|_| ApiError::invalid_token("Invalid token"))?;

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}

/// Token extraction order: `Authorization: Bearer` header first, then the
/// `auth_token` cookie.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = bearer_token(headers) {
        return Some(token);
    }
    CookieJar::from_headers(headers)
        .get(AUTH_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|t| !t.is_empty())
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth = headers.get("authorization")?.to_str().ok()?;
    let token = auth.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(
                axum::http::HeaderName::from_bytes(name.as_bytes()).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        map
    }

    #[test]
    fn bearer_wins_over_cookie() {
        let map = headers(&[
            ("authorization", "Bearer header-token"),
            ("cookie", "auth_token=cookie-token"),
        ]);
        assert_eq!(extract_token(&map).as_deref(), Some("header-token"));
    }

    #[test]
    fn falls_back_to_cookie() {
        let map = headers(&[("cookie", "other=1; auth_token=cookie-token")]);
        assert_eq!(extract_token(&map).as_deref(), Some("cookie-token"));
    }

    #[test]
    fn missing_credential_yields_none() {
        assert_eq!(extract_token(&HeaderMap::new()), None);
        // Non-bearer scheme and empty bearer are not credentials
        let map = headers(&[("authorization", "Basic abc")]);
        assert_eq!(extract_token(&map), None);
        let map = headers(&[("authorization", "Bearer ")]);
        assert_eq!(extract_token(&map), None);
    }

    #[test]
    fn role_gate() {
        let auth = AuthUser {
            user_id: Uuid::new_v4(),
            role: Role::Employee,
        };
        assert!(auth.require_role(&[Role::Employee, Role::Hr]).is_ok());

        let err = auth.require_role(&[Role::Hr]).unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::FORBIDDEN);
        assert!(err.message().contains("HR"));
    }
}
