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
use crate::models::contract::{ContractRow, ContractStatus, ContractType};
use crate::models::Role;

use super::utils::{missing_fields, parse_date, parse_enum, parse_uuid};

const LIST_SQL: &str = "SELECT c.id, c.employee_id, c.type, c.start_date, c.end_date, \
         c.status, c.created_at, u.name AS user_name, u.email AS user_email \
     FROM contracts c \
     JOIN employees e ON e.id = c.employee_id \
     JOIN users u ON u.id = e.user_id \
     ORDER BY c.created_at DESC";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContractRequest {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub employee_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContractRequest {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
}

/// GET /api/contracts
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    auth.require_role(&[Role::Admin, Role::Hr])?;

    let rows = sqlx::query_as::<_, ContractRow>(LIST_SQL)
        .fetch_all(&state.pool)
        .await
        .map_err(|e| map_db_error(e, "contract"))?;

    Ok(Json(
        rows.into_iter()
            .map(ContractRow::into_response)
            .collect::<Vec<_>>(),
    ))
}

/// POST /api/contracts - new contracts start ACTIVE
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateContractRequest>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require_role(&[Role::Hr])?;

    let (kind_raw, start_raw, employee_raw) =
        match (&payload.kind, &payload.start_date, &payload.employee_id) {
            (Some(k), Some(s), Some(e)) => (k, s, e),
            _ => return Err(missing_fields()),
        };

    let kind: ContractType = parse_enum("contract type", kind_raw)?;
    let start_date = parse_date("startDate", start_raw)?;
    let end_date = payload
        .end_date
        .as_deref()
        .map(|raw| parse_date("endDate", raw))
        .transpose()?;
    let employee_id = parse_uuid("employee ID", employee_raw)?;

    let row = sqlx::query_as::<_, ContractRow>(
        "WITH ins AS ( \
             INSERT INTO contracts (employee_id, type, start_date, end_date, status) \
             VALUES ($1, $2, $3, $4, 'ACTIVE') \
             RETURNING id, employee_id, type, start_date, end_date, status, created_at \
         ) \
         SELECT ins.id, ins.employee_id, ins.type, ins.start_date, ins.end_date, \
                ins.status, ins.created_at, u.name AS user_name, u.email AS user_email \
         FROM ins \
         JOIN employees e ON e.id = ins.employee_id \
         JOIN users u ON u.id = e.user_id",
    )
    .bind(employee_id)
    .bind(kind.as_str())
    .bind(start_date)
    .bind(end_date)
    .fetch_one(&state.pool)
    .await
    .map_err(|e| map_db_error(e, "contract"))?;

    Ok((StatusCode::CREATED, Json(row.into_response())))
}

/// PUT /api/contracts/:id - partial update
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateContractRequest>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require_role(&[Role::Admin, Role::Hr])?;

    let kind = payload
        .kind
        .as_deref()
        .map(|raw| parse_enum::<ContractType>("contract type", raw))
        .transpose()?;
    let status = payload
        .status
        .as_deref()
        .map(|raw| parse_enum::<ContractStatus>("contract status", raw))
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

    let row = sqlx::query_as::<_, ContractRow>(
        "WITH upd AS ( \
             UPDATE contracts SET \
                 type = COALESCE($2, type), \
                 start_date = COALESCE($3, start_date), \
                 end_date = COALESCE($4, end_date), \
                 status = COALESCE($5, status), \
                 updated_at = now() \
             WHERE id = $1 \
             RETURNING id, employee_id, type, start_date, end_date, status, created_at \
         ) \
         SELECT upd.id, upd.employee_id, upd.type, upd.start_date, upd.end_date, \
                upd.status, upd.created_at, u.name AS user_name, u.email AS user_email \
         FROM upd \
         JOIN employees e ON e.id = upd.employee_id \
         JOIN users u ON u.id = e.user_id",
    )
    .bind(id)
    .bind(kind.map(|k| k.as_str()))
    .bind(start_date)
    .bind(end_date)
    .bind(status.map(|s| s.as_str()))
    .fetch_one(&state.pool)
    .await
    .map_err(|e| map_db_error(e, "contract"))?;

    Ok(Json(row.into_response()))
}

/// DELETE /api/contracts/:id
pub async fn remove(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require_role(&[Role::Admin, Role::Hr])?;

    let result = sqlx::query("DELETE FROM contracts WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await
        .map_err(|e| map_db_error(e, "contract"))?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Contract not found"));
    }

    Ok(Json(json!({ "message": "Contract deleted successfully" })))
}
