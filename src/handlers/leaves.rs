// Leave requests are self-service: any authenticated user may file one,
// unlike every other write path in the API.
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::db::AppState;
use crate::error::{map_db_error, ApiError};
use crate::middleware::AuthUser;
use crate::models::leave::{LeaveRow, LeaveStatus, LeaveType};

use super::utils::{missing_fields, parse_date, parse_enum, parse_uuid};

const LIST_SQL: &str = "SELECT l.id, l.employee_id, l.type, l.start_date, l.end_date, \
         l.status, l.comment, l.created_at, u.name AS user_name, u.email AS user_email \
     FROM leaves l \
     JOIN employees e ON e.id = l.employee_id \
     JOIN users u ON u.id = e.user_id \
     ORDER BY l.created_at DESC";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeaveRequest {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub employee_id: Option<String>,
    pub comment: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLeaveRequest {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
    pub comment: Option<String>,
}

/// GET /api/leaves
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let rows = sqlx::query_as::<_, LeaveRow>(LIST_SQL)
        .fetch_all(&state.pool)
        .await
        .map_err(|e| map_db_error(e, "leave"))?;

    Ok(Json(
        rows.into_iter()
            .map(LeaveRow::into_response)
            .collect::<Vec<_>>(),
    ))
}

/// POST /api/leaves - new requests start PENDING
pub async fn create(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(payload): Json<CreateLeaveRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (kind_raw, start_raw, end_raw, employee_raw) = match (
        &payload.kind,
        &payload.start_date,
        &payload.end_date,
        &payload.employee_id,
    ) {
        (Some(k), Some(s), Some(e), Some(emp)) => (k, s, e, emp),
        _ => return Err(missing_fields()),
    };

    let kind: LeaveType = parse_enum("leave type", kind_raw)?;
    let start_date = parse_date("startDate", start_raw)?;
    let end_date = parse_date("endDate", end_raw)?;
    let employee_id = parse_uuid("employee ID", employee_raw)?;

    check_date_order(start_date, end_date)?;

    let row = sqlx::query_as::<_, LeaveRow>(
        "WITH ins AS ( \
             INSERT INTO leaves (employee_id, type, start_date, end_date, status, comment) \
             VALUES ($1, $2, $3, $4, 'PENDING', $5) \
             RETURNING id, employee_id, type, start_date, end_date, status, comment, created_at \
         ) \
         SELECT ins.id, ins.employee_id, ins.type, ins.start_date, ins.end_date, \
                ins.status, ins.comment, ins.created_at, \
                u.name AS user_name, u.email AS user_email \
         FROM ins \
         JOIN employees e ON e.id = ins.employee_id \
         JOIN users u ON u.id = e.user_id",
    )
    .bind(employee_id)
    .bind(kind.as_str())
    .bind(start_date)
    .bind(end_date)
    .bind(payload.comment)
    .fetch_one(&state.pool)
    .await
    .map_err(|e| map_db_error(e, "leave"))?;

    Ok((StatusCode::CREATED, Json(row.into_response())))
}

/// PUT /api/leaves/:id - partial update; approval happens here by flipping
/// status. Date ordering is re-checked whenever either date changes, with
/// the stored row filling in the bound the request leaves out.
pub async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateLeaveRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let kind = payload
        .kind
        .as_deref()
        .map(|raw| parse_enum::<LeaveType>("leave type", raw))
        .transpose()?;
    let status = payload
        .status
        .as_deref()
        .map(|raw| parse_enum::<LeaveStatus>("leave status", raw))
        .transpose()?;
    let start_date = payload
        .start_date
        .as_deref()
        .map(|raw| parse_date("startDate", raw))
        .transpose()?;
    let end_date = payload
        .end_date
        .as_deref()
        .map(|raw| parse_date("endDate", raw))
        .transpose()?;

    match (start_date, end_date) {
        (None, None) => {}
        (Some(start), Some(end)) => check_date_order(start, end)?,
        _ => {
            let (stored_start, stored_end) = stored_dates(&state, id).await?;
            check_updated_range(stored_start, stored_end, start_date, end_date)?;
        }
    }

    let row = sqlx::query_as::<_, LeaveRow>(
        "WITH upd AS ( \
             UPDATE leaves SET \
                 type = COALESCE($2, type), \
                 start_date = COALESCE($3, start_date), \
                 end_date = COALESCE($4, end_date), \
                 status = COALESCE($5, status), \
                 comment = COALESCE($6, comment), \
                 updated_at = now() \
             WHERE id = $1 \
             RETURNING id, employee_id, type, start_date, end_date, status, comment, created_at \
         ) \
         SELECT upd.id, upd.employee_id, upd.type, upd.start_date, upd.end_date, \
                upd.status, upd.comment, upd.created_at, \
                u.name AS user_name, u.email AS user_email \
         FROM upd \
         JOIN employees e ON e.id = upd.employee_id \
         JOIN users u ON u.id = e.user_id",
    )
    .bind(id)
    .bind(kind.map(|k| k.as_str()))
    .bind(start_date)
    .bind(end_date)
    .bind(status.map(|s| s.as_str()))
    .bind(payload.comment)
    .fetch_one(&state.pool)
    .await
    .map_err(|e| map_db_error(e, "leave"))?;

    Ok(Json(row.into_response()))
}

/// DELETE /api/leaves/:id
pub async fn remove(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let result = sqlx::query("DELETE FROM leaves WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await
        .map_err(|e| map_db_error(e, "leave"))?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Leave not found"));
    }

    Ok(Json(json!({ "message": "Leave deleted successfully" })))
}

fn check_date_order(start: NaiveDate, end: NaiveDate) -> Result<(), ApiError> {
    if end <= start {
        return Err(ApiError::validation("End date must be after start date"));
    }
    Ok(())
}

/// Ordering check for a one-sided date update: the stored row supplies
/// whichever bound the request leaves out.
fn check_updated_range(
    stored_start: NaiveDate,
    stored_end: NaiveDate,
    new_start: Option<NaiveDate>,
    new_end: Option<NaiveDate>,
) -> Result<(), ApiError> {
    check_date_order(
        new_start.unwrap_or(stored_start),
        new_end.unwrap_or(stored_end),
    )
}

async fn stored_dates(state: &AppState, id: Uuid) -> Result<(NaiveDate, NaiveDate), ApiError> {
    sqlx::query_as("SELECT start_date, end_date FROM leaves WHERE id = $1")
        .bind(id)
        .fetch_one(&state.pool)
        .await
        .map_err(|e| map_db_error(e, "leave"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 9, d).unwrap()
    }

    #[test]
    fn date_order_rejects_inverted_and_equal() {
        assert!(check_date_order(day(1), day(10)).is_ok());
        assert!(check_date_order(day(10), day(1)).is_err());
        assert!(check_date_order(day(5), day(5)).is_err());
    }

    #[test]
    fn lone_end_date_is_checked_against_stored_start() {
        // Stored range 10th..20th; moving only the end before the stored
        // start must not pass
        assert!(check_updated_range(day(10), day(20), None, Some(day(1))).is_err());
        assert!(check_updated_range(day(10), day(20), None, Some(day(25))).is_ok());
    }

    #[test]
    fn lone_start_date_is_checked_against_stored_end() {
        assert!(check_updated_range(day(10), day(20), Some(day(22)), None).is_err());
        assert!(check_updated_range(day(10), day(20), Some(day(15)), None).is_ok());
    }
}
