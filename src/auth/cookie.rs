use axum_extra::extract::cookie::{Cookie, SameSite};

use crate::config;

/// Cookie used by the server-rendered flow. The dashboard client uses a
/// bearer header instead; both transports carry the same token format.
pub const AUTH_COOKIE: &str = "auth_token";

/// Build the `auth_token` session cookie: httpOnly, SameSite=Strict,
/// path `/`, secure outside development, max-age matching the token TTL.
pub fn session_cookie(token: String) -> Cookie<'static> {
    let max_age = time::Duration::seconds(super::token::session_ttl().num_seconds());
    Cookie::build((AUTH_COOKIE, token))
        .http_only(true)
        .secure(config::config().is_production())
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(max_age)
        .build()
}

/// Expire the session cookie immediately (logout).
pub fn clear_cookie() -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, ""))
        .http_only(true)
        .secure(config::config().is_production())
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(time::Duration::ZERO)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_cookie_attributes() {
        let cookie = session_cookie("tok".to_string());
        assert_eq!(cookie.name(), AUTH_COOKIE);
        assert_eq!(cookie.value(), "tok");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.path(), Some("/"));
        assert!(cookie.max_age().unwrap() > time::Duration::ZERO);
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        let cookie = clear_cookie();
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
    }
}
