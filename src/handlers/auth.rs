// Authentication endpoints. Two token delivery mechanisms coexist on
// purpose: login/register set the httpOnly session cookie for
// server-rendered navigation, while /api/auth/token returns the raw token
// for the dashboard client to replay as a bearer header.
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde_json::json;

use crate::auth::{cookie, password, token};
use crate::db::AppState;
use crate::error::{map_db_error, ApiError};
use crate::middleware::AuthUser;
use crate::models::user::User;
use crate::models::Role;

use super::utils::{missing_fields, parse_enum};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// POST /api/auth/register - Create an account plus its default employee
/// record, and open a cookie session.
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (name, email, pass) = match (&payload.name, &payload.email, &payload.password) {
        (Some(n), Some(e), Some(p)) if !n.is_empty() && !e.is_empty() && !p.is_empty() => {
            (n, e, p)
        }
        _ => return Err(missing_fields()),
    };
    let role: Role = match &payload.role {
        Some(r) => parse_enum("role", r)?,
        None => Role::Employee,
    };

    let password_hash = password::hash(pass)?;

    let mut tx = state
        .pool
        .begin()
        .await
        .map_err(|e| map_db_error(e, "user"))?;

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (name, email, password_hash, role) \
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(name)
    .bind(email)
    .bind(&password_hash)
    .bind(role.as_str())
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| map_db_error(e, "user"))?;

    // Every account owns exactly one employee record; new signups get a
    // placeholder until HR fills in the details.
    sqlx::query(
        "INSERT INTO employees (user_id, position, department, start_date, salary) \
         VALUES ($1, 'New Employee', 'Unassigned', CURRENT_DATE, 0)",
    )
    .bind(user.id)
    .execute(&mut *tx)
    .await
    .map_err(|e| map_db_error(e, "employee"))?;

    tx.commit().await.map_err(|e| map_db_error(e, "user"))?;

    let session = token::issue(user.id, role, token::session_ttl())?;
    tracing::info!(user_id = %user.id, "registered new account");

    Ok((
        jar.add(cookie::session_cookie(session)),
        (
            StatusCode::CREATED,
            Json(json!({ "user": user.to_public() })),
        ),
    ))
}

/// POST /api/auth/login - Cookie session flow (server-rendered pages).
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (user, role) = check_credentials(&state, &payload).await?;

    let session = token::issue(user.id, role, token::session_ttl())?;

    Ok((
        jar.add(cookie::session_cookie(session)),
        Json(json!({ "user": user.to_public() })),
    ))
}

/// POST /api/auth/token - Bearer flow for the dashboard client.
/// Issues a 24h token in the response body; no cookie is set.
pub async fn token(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (user, role) = check_credentials(&state, &payload).await?;

    let ttl = token::bearer_ttl();
    let bearer = token::issue(user.id, role, ttl)?;

    Ok(Json(json!({
        "user": user.to_public(),
        "token": bearer,
        "expiresIn": ttl.num_seconds(),
    })))
}

/// POST /api/auth/logout - Expire the session cookie.
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (
        jar.add(cookie::clear_cookie()),
        Json(json!({ "message": "Logged out successfully" })),
    )
}

/// GET /api/auth/whoami - Echo the authenticated caller's identity.
pub async fn whoami(auth: AuthUser) -> Json<serde_json::Value> {
    Json(json!({ "userId": auth.user_id, "role": auth.role }))
}

async fn check_credentials(
    state: &AppState,
    payload: &LoginRequest,
) -> Result<(User, Role), ApiError> {
    let (email, pass) = match (&payload.email, &payload.password) {
        (Some(e), Some(p)) if !e.is_empty() && !p.is_empty() => (e, p),
        _ => return Err(missing_fields()),
    };

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(&state.pool)
        .await
        .map_err(|e| map_db_error(e, "user"))?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    if !password::verify(pass, &user.password_hash) {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let role = user.role().map_err(|_| {
        tracing::error!(user_id = %user.id, role = %user.role, "user row has unknown role");
        ApiError::internal("Account is misconfigured")
    })?;

    Ok((user, role))
}
