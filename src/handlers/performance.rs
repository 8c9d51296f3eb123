use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::db::AppState;
use crate::error::{map_db_error, ApiError};
use crate::middleware::AuthUser;
use crate::models::performance::{PerformanceRow, PerformanceStats, MAX_RATING, MIN_RATING};
use crate::models::Role;

use super::utils::{missing_fields, parse_int, parse_uuid};

const REVIEWER_ROLES: &[Role] = &[Role::Manager, Role::Hr, Role::Admin];

const LIST_SQL: &str = "SELECT p.id, p.employee_id, p.rating, p.feedback, p.review_date, \
         p.reviewer_id, p.created_at, u.name AS user_name, u.email AS user_email \
     FROM performances p \
     JOIN employees e ON e.id = p.employee_id \
     JOIN users u ON u.id = e.user_id \
     ORDER BY p.review_date DESC";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePerformanceRequest {
    pub employee_id: Option<String>,
    pub rating: Option<Value>,
    pub feedback: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePerformanceRequest {
    pub rating: Option<Value>,
    pub feedback: Option<String>,
}

/// GET /api/performance - reviews plus the average-rating aggregate
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    auth.require_role(REVIEWER_ROLES)?;

    let rows = sqlx::query_as::<_, PerformanceRow>(LIST_SQL)
        .fetch_all(&state.pool)
        .await
        .map_err(|e| map_db_error(e, "performance review"))?;

    let (average_rating, total_reviews): (f64, i64) = sqlx::query_as(
        "SELECT COALESCE(AVG(rating)::float8, 0), COUNT(*) FROM performances",
    )
    .fetch_one(&state.pool)
    .await
    .map_err(|e| map_db_error(e, "performance review"))?;

    let performances: Vec<_> = rows
        .into_iter()
        .map(PerformanceRow::into_response)
        .collect();
    Ok(Json(json!({
        "performances": performances,
        "stats": PerformanceStats {
            average_rating,
            total_reviews,
        },
    })))
}

/// POST /api/performance - review date is stamped server-side, and the
/// reviewer is whoever presented the token.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreatePerformanceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require_role(REVIEWER_ROLES)?;

    let (employee_raw, rating_raw, feedback) =
        match (&payload.employee_id, &payload.rating, &payload.feedback) {
            (Some(e), Some(r), Some(f)) if !f.is_empty() => (e, r, f),
            _ => return Err(missing_fields()),
        };

    let employee_id = parse_uuid("employee ID", employee_raw)?;
    let rating = parse_rating(rating_raw)?;

    let row = sqlx::query_as::<_, PerformanceRow>(
        "WITH ins AS ( \
             INSERT INTO performances (employee_id, rating, feedback, review_date, reviewer_id) \
             VALUES ($1, $2, $3, now(), $4) \
             RETURNING id, employee_id, rating, feedback, review_date, reviewer_id, created_at \
         ) \
         SELECT ins.id, ins.employee_id, ins.rating, ins.feedback, ins.review_date, \
                ins.reviewer_id, ins.created_at, \
                u.name AS user_name, u.email AS user_email \
         FROM ins \
         JOIN employees e ON e.id = ins.employee_id \
         JOIN users u ON u.id = e.user_id",
    )
    .bind(employee_id)
    .bind(rating)
    .bind(feedback)
    .bind(auth.user_id)
    .fetch_one(&state.pool)
    .await
    .map_err(|e| map_db_error(e, "performance review"))?;

    Ok((StatusCode::CREATED, Json(row.into_response())))
}

/// PUT /api/performance/:id - partial update of rating/feedback
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePerformanceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require_role(REVIEWER_ROLES)?;

    let rating = payload.rating.as_ref().map(parse_rating).transpose()?;

    let row = sqlx::query_as::<_, PerformanceRow>(
        "WITH upd AS ( \
             UPDATE performances SET \
                 rating = COALESCE($2, rating), \
                 feedback = COALESCE($3, feedback), \
                 updated_at = now() \
             WHERE id = $1 \
             RETURNING id, employee_id, rating, feedback, review_date, reviewer_id, created_at \
         ) \
         SELECT upd.id, upd.employee_id, upd.rating, upd.feedback, upd.review_date, \
                upd.reviewer_id, upd.created_at, \
                u.name AS user_name, u.email AS user_email \
         FROM upd \
         JOIN employees e ON e.id = upd.employee_id \
         JOIN users u ON u.id = e.user_id",
    )
    .bind(id)
    .bind(rating)
    .bind(payload.feedback)
    .fetch_one(&state.pool)
    .await
    .map_err(|e| map_db_error(e, "performance review"))?;

    Ok(Json(row.into_response()))
}

/// DELETE /api/performance/:id
pub async fn remove(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require_role(REVIEWER_ROLES)?;

    let result = sqlx::query("DELETE FROM performances WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await
        .map_err(|e| map_db_error(e, "performance review"))?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Performance review not found"));
    }

    Ok(Json(json!({ "message": "Performance review deleted successfully" })))
}

fn parse_rating(raw: &Value) -> Result<i32, ApiError> {
    let rating = parse_int("Rating", raw)?;
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(ApiError::validation("Rating must be between 1 and 5"));
    }
    Ok(rating)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds() {
        assert_eq!(parse_rating(&json!(1)).unwrap(), 1);
        assert_eq!(parse_rating(&json!("5")).unwrap(), 5);
        assert!(parse_rating(&json!(0)).is_err());
        assert!(parse_rating(&json!(6)).is_err());
        assert!(parse_rating(&json!("excellent")).is_err());
    }
}
