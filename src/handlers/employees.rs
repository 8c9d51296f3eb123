use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::password;
use crate::db::AppState;
use crate::error::{map_db_error, ApiError};
use crate::middleware::AuthUser;
use crate::models::employee::EmployeeRow;
use crate::models::Role;

use super::utils::{missing_fields, parse_date, parse_decimal, parse_uuid};

const SELECT_COLUMNS: &str = "e.id, e.user_id, e.position, e.department, e.start_date, \
     e.salary, e.manager_id, e.created_at, \
     u.name AS user_name, u.email AS user_email, u.role AS user_role, \
     mu.name AS manager_name";

const FROM_JOINED: &str = "FROM employees e \
     JOIN users u ON u.id = e.user_id \
     LEFT JOIN employees m ON m.id = e.manager_id \
     LEFT JOIN users mu ON mu.id = m.user_id";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub start_date: Option<String>,
    pub salary: Option<Value>,
    pub manager_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeRequest {
    pub position: Option<String>,
    pub department: Option<String>,
    pub start_date: Option<String>,
    pub salary: Option<Value>,
    pub manager_id: Option<String>,
}

/// GET /api/employees - list, sorted by user name
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    auth.require_role(&[Role::Admin, Role::Hr])?;

    let sql = format!("SELECT {} {} ORDER BY u.name ASC", SELECT_COLUMNS, FROM_JOINED);
    let rows = sqlx::query_as::<_, EmployeeRow>(&sql)
        .fetch_all(&state.pool)
        .await
        .map_err(|e| map_db_error(e, "employee"))?;

    Ok(Json(
        rows.into_iter()
            .map(EmployeeRow::into_response)
            .collect::<Vec<_>>(),
    ))
}

/// POST /api/employees - create the employee and its backing user account
/// in one transaction. New accounts always start with the EMPLOYEE role.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateEmployeeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require_role(&[Role::Hr])?;

    let (name, email, pass, position, department) = match (
        &payload.name,
        &payload.email,
        &payload.password,
        &payload.position,
        &payload.department,
    ) {
        (Some(n), Some(e), Some(p), Some(pos), Some(dep))
            if !n.is_empty() && !e.is_empty() && !p.is_empty() =>
        {
            (n, e, p, pos, dep)
        }
        _ => return Err(missing_fields()),
    };
    let start_date = match &payload.start_date {
        Some(raw) => parse_date("startDate", raw)?,
        None => return Err(missing_fields()),
    };
    let salary = match &payload.salary {
        Some(raw) => parse_decimal("Salary", raw)?,
        None => return Err(missing_fields()),
    };
    let manager_id = payload
        .manager_id
        .as_deref()
        .map(|raw| parse_uuid("manager ID", raw))
        .transpose()?;

    let password_hash = password::hash(pass)?;

    let mut tx = state
        .pool
        .begin()
        .await
        .map_err(|e| map_db_error(e, "employee"))?;

    let user_id: Uuid = sqlx::query_scalar(
        "INSERT INTO users (name, email, password_hash, role) \
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(name)
    .bind(email)
    .bind(&password_hash)
    .bind(Role::Employee.as_str())
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| map_db_error(e, "employee"))?;

    let employee_id: Uuid = sqlx::query_scalar(
        "INSERT INTO employees (user_id, position, department, start_date, salary, manager_id) \
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
    )
    .bind(user_id)
    .bind(position)
    .bind(department)
    .bind(start_date)
    .bind(salary)
    .bind(manager_id)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| map_db_error(e, "employee"))?;

    tx.commit().await.map_err(|e| map_db_error(e, "employee"))?;

    let row = fetch_one(&state, employee_id).await?;
    Ok((StatusCode::CREATED, Json(row.into_response())))
}

/// PUT /api/employees/:id - partial update of employment fields
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEmployeeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require_role(&[Role::Admin, Role::Hr])?;

    let start_date = payload
        .start_date
        .as_deref()
        .map(|raw| parse_date("startDate", raw))
        .transpose()?;
    let salary: Option<Decimal> = payload
        .salary
        .as_ref()
        .map(|raw| parse_decimal("Salary", raw))
        .transpose()?;
    let manager_id = payload
        .manager_id
        .as_deref()
        .map(|raw| parse_uuid("manager ID", raw))
        .transpose()?;

    let updated: Uuid = sqlx::query_scalar(
        "UPDATE employees SET \
             position = COALESCE($2, position), \
             department = COALESCE($3, department), \
             start_date = COALESCE($4, start_date), \
             salary = COALESCE($5, salary), \
             manager_id = COALESCE($6, manager_id), \
             updated_at = now() \
         WHERE id = $1 RETURNING id",
    )
    .bind(id)
    .bind(payload.position)
    .bind(payload.department)
    .bind(start_date)
    .bind(salary)
    .bind(manager_id)
    .fetch_one(&state.pool)
    .await
    .map_err(|e| map_db_error(e, "employee"))?;

    let row = fetch_one(&state, updated).await?;
    Ok(Json(row.into_response()))
}

/// DELETE /api/employees/:id
pub async fn remove(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require_role(&[Role::Admin, Role::Hr])?;

    let result = sqlx::query("DELETE FROM employees WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await
        .map_err(|e| map_db_error(e, "employee"))?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Employee not found"));
    }

    Ok(Json(json!({ "message": "Employee deleted successfully" })))
}

async fn fetch_one(state: &AppState, id: Uuid) -> Result<EmployeeRow, ApiError> {
    let sql = format!("SELECT {} {} WHERE e.id = $1", SELECT_COLUMNS, FROM_JOINED);
    sqlx::query_as::<_, EmployeeRow>(&sql)
        .bind(id)
        .fetch_one(&state.pool)
        .await
        .map_err(|e| map_db_error(e, "employee"))
}
