use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json},
};
use serde_json::{json, Value};

use crate::db::{self, AppState};

/// GET / - service banner
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "HRM API",
        "version": version,
        "description": "HR management REST API built with Rust (Axum)",
        "endpoints": {
            "home": "/ (public)",
            "auth": "/api/auth/login, /api/auth/register, /api/auth/token, /api/auth/logout (public)",
            "whoami": "/api/auth/whoami (protected)",
            "employees": "/api/employees[/:id] (protected - ADMIN/HR)",
            "contracts": "/api/contracts[/:id] (protected - ADMIN/HR)",
            "leaves": "/api/leaves[/:id] (protected)",
            "payroll": "/api/payroll[/:id] (protected - ADMIN/HR)",
            "performance": "/api/performance[/:id] (protected - MANAGER and above)",
            "training": "/api/training[/:id] (protected)",
            "dashboard": "/api/dashboard/overview (protected)",
        }
    }))
}

/// GET /health - liveness plus database ping
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match db::health_check(&state.pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database_error": e.to_string()
            })),
        ),
    }
}

/// GET /auth/login - target of the browser gate redirect. The real login
/// page is rendered by the dashboard client; this placeholder keeps the
/// route resolvable when the API runs standalone.
pub async fn login_page() -> Html<&'static str> {
    Html(
        "<!doctype html><html><head><title>Sign in</title></head>\
         <body><h1>Sign in</h1>\
         <p>POST credentials to <code>/api/auth/login</code>.</p>\
         </body></html>",
    )
}

/// GET /auth/register
pub async fn register_page() -> Html<&'static str> {
    Html(
        "<!doctype html><html><head><title>Register</title></head>\
         <body><h1>Register</h1>\
         <p>POST details to <code>/api/auth/register</code>.</p>\
         </body></html>",
    )
}
