use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::db::AppState;
use crate::error::{map_db_error, ApiError};
use crate::middleware::AuthUser;
use crate::models::training::{TrainingRow, TrainingStats, TrainingStatus};

use super::utils::{missing_fields, parse_date, parse_enum, parse_uuid};

const LIST_SQL: &str = "SELECT t.id, t.employee_id, t.title, t.description, t.start_date, \
         t.status, t.completion_date, t.created_at, \
         u.name AS user_name, u.email AS user_email \
     FROM trainings t \
     JOIN employees e ON e.id = t.employee_id \
     JOIN users u ON u.id = e.user_id \
     ORDER BY t.start_date DESC";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTrainingRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub status: Option<String>,
    pub employee_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTrainingRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub completion_date: Option<String>,
}

/// GET /api/training - listing plus per-status counts
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let rows = sqlx::query_as::<_, TrainingRow>(LIST_SQL)
        .fetch_all(&state.pool)
        .await
        .map_err(|e| map_db_error(e, "training"))?;

    let (total, completed, in_progress, not_started): (i64, i64, i64, i64) = sqlx::query_as(
        "SELECT COUNT(*), \
                COUNT(*) FILTER (WHERE status = 'COMPLETED'), \
                COUNT(*) FILTER (WHERE status = 'IN_PROGRESS'), \
                COUNT(*) FILTER (WHERE status = 'NOT_STARTED') \
         FROM trainings",
    )
    .fetch_one(&state.pool)
    .await
    .map_err(|e| map_db_error(e, "training"))?;

    let trainings: Vec<_> = rows.into_iter().map(TrainingRow::into_response).collect();
    Ok(Json(json!({
        "trainings": trainings,
        "stats": TrainingStats {
            total,
            completed,
            in_progress,
            not_started,
        },
    })))
}

/// POST /api/training - status defaults to NOT_STARTED
pub async fn create(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(payload): Json<CreateTrainingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (title, start_raw, employee_raw) =
        match (&payload.title, &payload.start_date, &payload.employee_id) {
            (Some(t), Some(s), Some(e)) if !t.is_empty() => (t, s, e),
            _ => return Err(missing_fields()),
        };

    let start_date = parse_date("startDate", start_raw)?;
    let employee_id = parse_uuid("employee ID", employee_raw)?;
    let status = match &payload.status {
        Some(raw) => parse_enum::<TrainingStatus>("training status", raw)?,
        None => TrainingStatus::NotStarted,
    };

    let row = sqlx::query_as::<_, TrainingRow>(
        "WITH ins AS ( \
             INSERT INTO trainings (employee_id, title, description, start_date, status) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, employee_id, title, description, start_date, status, \
                       completion_date, created_at \
         ) \
         SELECT ins.id, ins.employee_id, ins.title, ins.description, ins.start_date, \
                ins.status, ins.completion_date, ins.created_at, \
                u.name AS user_name, u.email AS user_email \
         FROM ins \
         JOIN employees e ON e.id = ins.employee_id \
         JOIN users u ON u.id = e.user_id",
    )
    .bind(employee_id)
    .bind(title)
    .bind(payload.description)
    .bind(start_date)
    .bind(status.as_str())
    .fetch_one(&state.pool)
    .await
    .map_err(|e| map_db_error(e, "training"))?;

    Ok((StatusCode::CREATED, Json(row.into_response())))
}

/// PUT /api/training/:id - partial update; completion date arrives when a
/// course is marked COMPLETED.
pub async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTrainingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let status = payload
        .status
        .as_deref()
        .map(|raw| parse_enum::<TrainingStatus>("training status", raw))
        .transpose()?;
    let completion_date = payload
        .completion_date
        .as_deref()
        .map(|raw| parse_date("completionDate", raw))
        .transpose()?;

    let row = sqlx::query_as::<_, TrainingRow>(
        "WITH upd AS ( \
             UPDATE trainings SET \
                 title = COALESCE($2, title), \
                 description = COALESCE($3, description), \
                 status = COALESCE($4, status), \
                 completion_date = COALESCE($5, completion_date), \
                 updated_at = now() \
             WHERE id = $1 \
             RETURNING id, employee_id, title, description, start_date, status, \
                       completion_date, created_at \
         ) \
         SELECT upd.id, upd.employee_id, upd.title, upd.description, upd.start_date, \
                upd.status, upd.completion_date, upd.created_at, \
                u.name AS user_name, u.email AS user_email \
         FROM upd \
         JOIN employees e ON e.id = upd.employee_id \
         JOIN users u ON u.id = e.user_id",
    )
    .bind(id)
    .bind(payload.title)
    .bind(payload.description)
    .bind(status.map(|s| s.as_str()))
    .bind(completion_date)
    .fetch_one(&state.pool)
    .await
    .map_err(|e| map_db_error(e, "training"))?;

    Ok(Json(row.into_response()))
}

/// DELETE /api/training/:id
pub async fn remove(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let result = sqlx::query("DELETE FROM trainings WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await
        .map_err(|e| map_db_error(e, "training"))?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Training not found"));
    }

    Ok(Json(json!({ "message": "Training deleted successfully" })))
}
