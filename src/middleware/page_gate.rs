use axum::{
    extract::Request,
    http::Method,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::auth::cookie::AUTH_COOKIE;
use crate::auth::token;

/// Pages reachable without a session.
const PUBLIC_PAGES: &[&str] = &["/", "/auth/login", "/auth/register"];

/// Static asset prefixes excluded from the gate, alongside `/api` and `/health`.
const ASSET_PREFIXES: &[&str] = &["/assets/", "/static/"];

/// Site-wide request filter: browser navigations without a valid session
/// cookie are redirected to the login page. API paths are excluded and do
/// their own per-handler token checks.
pub async fn browser_gate(request: Request, next: Next) -> Response {
    if !is_gated(request.method(), request.uri().path()) {
        return next.run(request).await;
    }

    let jar = CookieJar::from_headers(request.headers());
    let authenticated = jar
        .get(AUTH_COOKIE)
        .map(|c| token::verify(c.value()).is_ok())
        .unwrap_or(false);

    if authenticated {
        next.run(request).await
    } else {
        Redirect::to("/auth/login").into_response()
    }
}

fn is_gated(method: &Method, path: &str) -> bool {
    if method != Method::GET {
        return false;
    }
    if path.starts_with("/api/") || path == "/health" || path == "/favicon.ico" {
        return false;
    }
    if ASSET_PREFIXES.iter().any(|p| path.starts_with(p)) {
        return false;
    }
    !PUBLIC_PAGES.contains(&path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_and_assets_are_excluded() {
        assert!(!is_gated(&Method::GET, "/api/employees"));
        assert!(!is_gated(&Method::GET, "/health"));
        assert!(!is_gated(&Method::GET, "/assets/app.js"));
        assert!(!is_gated(&Method::GET, "/favicon.ico"));
        assert!(!is_gated(&Method::POST, "/api/auth/login"));
    }

    #[test]
    fn public_pages_are_excluded() {
        assert!(!is_gated(&Method::GET, "/"));
        assert!(!is_gated(&Method::GET, "/auth/login"));
        assert!(!is_gated(&Method::GET, "/auth/register"));
    }

    #[test]
    fn browser_navigations_are_gated() {
        assert!(is_gated(&Method::GET, "/dashboard"));
        assert!(is_gated(&Method::GET, "/dashboard/employees"));
    }
}
