// HTTP API error types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::config;

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    Validation(String),
    InvalidReference(String),

    // 401 Unauthorized
    Unauthorized(String),
    InvalidToken(String),

    // 403 Forbidden
    Forbidden(String),

    // 404 Not Found
    NotFound(String),

    // 409 Conflict
    Conflict(String),

    // 500 Internal Server Error; detail is only surfaced in development
    Internal { message: String, detail: Option<String> },
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidReference(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::Validation(msg)
            | ApiError::InvalidReference(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::InvalidToken(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg) => msg,
            ApiError::Internal { message, .. } => message,
        }
    }

    /// Convert to JSON response body. The body shape is `{"error": "..."}`;
    /// internal errors additionally carry a `details` field in development.
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::Internal { message, detail } => {
                let mut body = json!({ "error": message });
                if config::config().is_development() {
                    if let Some(detail) = detail {
                        body["details"] = json!(detail);
                    }
                }
                body
            }
            _ => json!({ "error": self.message() }),
        }
    }
}

// Static constructor methods
impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn invalid_reference(message: impl Into<String>) -> Self {
        ApiError::InvalidReference(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn invalid_token(message: impl Into<String>) -> Self {
        ApiError::InvalidToken(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal {
            message: message.into(),
            detail: None,
        }
    }
}

/// Translate a store failure into the client-facing taxonomy.
///
/// Postgres SQLSTATE codes carry the interesting cases: 23503 is a
/// foreign-key violation (a dangling employee reference from the client),
/// 23505 a unique violation (duplicate email). Everything else is logged
/// and collapsed to a generic 500.
pub fn map_db_error(err: sqlx::Error, context: &str) -> ApiError {
    if matches!(err, sqlx::Error::RowNotFound) {
        return ApiError::not_found(format!("{} not found", context));
    }

    if let Some(db_err) = err.as_database_error() {
        if let Some(code) = db_err.code() {
            if let Some(mapped) = map_sqlstate(code.as_ref()) {
                return mapped;
            }
        }
    }

    tracing::error!("database error ({}): {}", context, err);
    ApiError::Internal {
        message: format!("Failed to process {} request", context),
        detail: Some(err.to_string()),
    }
}

fn map_sqlstate(code: &str) -> Option<ApiError> {
    match code {
        "23503" => Some(ApiError::invalid_reference("Invalid employee ID")),
        // In practice unique violations come from users.email
        "23505" => Some(ApiError::conflict("An account with this email already exists")),
        _ => None,
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(ApiError::validation("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::invalid_reference("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::unauthorized("x").status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::invalid_token("x").status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::forbidden("x").status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::conflict("x").status_code(), StatusCode::CONFLICT);
        assert_eq!(ApiError::internal("x").status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn sqlstate_mapping() {
        let fk = map_sqlstate("23503").unwrap();
        assert_eq!(fk.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(fk.message(), "Invalid employee ID");

        let unique = map_sqlstate("23505").unwrap();
        assert_eq!(unique.status_code(), StatusCode::CONFLICT);

        assert!(map_sqlstate("40001").is_none());
    }

    #[test]
    fn error_body_shape() {
        let body = ApiError::forbidden("Unauthorized - HR access required").to_json();
        assert_eq!(body["error"], "Unauthorized - HR access required");
        assert!(body.get("details").is_none());
    }
}
