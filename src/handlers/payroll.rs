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

use crate::db::AppState;
use crate::error::{map_db_error, ApiError};
use crate::middleware::AuthUser;
use crate::models::payroll::{PayrollRow, PayrollStats, PayrollStatus, PayrollType};
use crate::models::Role;

use super::utils::{missing_fields, parse_date, parse_decimal, parse_enum, parse_uuid};

const LIST_SQL: &str = "SELECT p.id, p.employee_id, p.amount, p.type, p.payment_date, \
         p.status, p.notes, p.created_at, u.name AS user_name, u.email AS user_email \
     FROM payrolls p \
     JOIN employees e ON e.id = p.employee_id \
     JOIN users u ON u.id = e.user_id \
     ORDER BY p.payment_date DESC";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePayrollRequest {
    pub employee_id: Option<String>,
    pub amount: Option<Value>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub payment_date: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePayrollRequest {
    pub amount: Option<Value>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub payment_date: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

/// GET /api/payroll - listing plus the aggregates the payroll page shows
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    auth.require_role(&[Role::Admin, Role::Hr])?;

    let rows = sqlx::query_as::<_, PayrollRow>(LIST_SQL)
        .fetch_all(&state.pool)
        .await
        .map_err(|e| map_db_error(e, "payroll"))?;

    let (total_salaries, total_bonuses): (Decimal, Decimal) = sqlx::query_as(
        "SELECT COALESCE(SUM(amount) FILTER (WHERE type = 'SALARY'), 0), \
                COALESCE(SUM(amount) FILTER (WHERE type = 'BONUS'), 0) \
         FROM payrolls",
    )
    .fetch_one(&state.pool)
    .await
    .map_err(|e| map_db_error(e, "payroll"))?;

    let (average_salary, employee_count): (Decimal, i64) =
        sqlx::query_as("SELECT COALESCE(AVG(salary), 0), COUNT(*) FROM employees")
            .fetch_one(&state.pool)
            .await
            .map_err(|e| map_db_error(e, "payroll"))?;

    let payrolls: Vec<_> = rows.into_iter().map(PayrollRow::into_response).collect();
    Ok(Json(json!({
        "payrolls": payrolls,
        "stats": PayrollStats {
            total_salaries,
            total_bonuses,
            average_salary,
            employee_count,
        },
    })))
}

/// POST /api/payroll - records are marked PAID on entry
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreatePayrollRequest>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require_role(&[Role::Hr])?;

    let (employee_raw, amount_raw, kind_raw, date_raw) = match (
        &payload.employee_id,
        &payload.amount,
        &payload.kind,
        &payload.payment_date,
    ) {
        (Some(e), Some(a), Some(k), Some(d)) => (e, a, k, d),
        _ => return Err(missing_fields()),
    };

    let employee_id = parse_uuid("employee ID", employee_raw)?;
    let amount = parse_positive_amount(amount_raw)?;
    let kind: PayrollType = parse_enum("payroll type", kind_raw)?;
    let payment_date = parse_date("paymentDate", date_raw)?;

    let row = sqlx::query_as::<_, PayrollRow>(
        "WITH ins AS ( \
             INSERT INTO payrolls (employee_id, amount, type, payment_date, status, notes) \
             VALUES ($1, $2, $3, $4, 'PAID', $5) \
             RETURNING id, employee_id, amount, type, payment_date, status, notes, created_at \
         ) \
         SELECT ins.id, ins.employee_id, ins.amount, ins.type, ins.payment_date, \
                ins.status, ins.notes, ins.created_at, \
                u.name AS user_name, u.email AS user_email \
         FROM ins \
         JOIN employees e ON e.id = ins.employee_id \
         JOIN users u ON u.id = e.user_id",
    )
    .bind(employee_id)
    .bind(amount)
    .bind(kind.as_str())
    .bind(payment_date)
    .bind(payload.notes)
    .fetch_one(&state.pool)
    .await
    .map_err(|e| map_db_error(e, "payroll"))?;

    Ok((StatusCode::CREATED, Json(row.into_response())))
}

/// PUT /api/payroll/:id - partial update of the payroll record
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePayrollRequest>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require_role(&[Role::Admin, Role::Hr])?;

    let amount = payload
        .amount
        .as_ref()
        .map(parse_positive_amount)
        .transpose()?;
    let kind = payload
        .kind
        .as_deref()
        .map(|raw| parse_enum::<PayrollType>("payroll type", raw))
        .transpose()?;
    let status = payload
        .status
        .as_deref()
        .map(|raw| parse_enum::<PayrollStatus>("payroll status", raw))
        .transpose()?;
    let payment_date = payload
        .payment_date
        .as_deref()
        .map(|raw| parse_date("paymentDate", raw))
        .transpose()?;

    let row = sqlx::query_as::<_, PayrollRow>(
        "WITH upd AS ( \
             UPDATE payrolls SET \
                 amount = COALESCE($2, amount), \
                 type = COALESCE($3, type), \
                 payment_date = COALESCE($4, payment_date), \
                 status = COALESCE($5, status), \
                 notes = COALESCE($6, notes), \
                 updated_at = now() \
             WHERE id = $1 \
             RETURNING id, employee_id, amount, type, payment_date, status, notes, created_at \
         ) \
         SELECT upd.id, upd.employee_id, upd.amount, upd.type, upd.payment_date, \
                upd.status, upd.notes, upd.created_at, \
                u.name AS user_name, u.email AS user_email \
         FROM upd \
         JOIN employees e ON e.id = upd.employee_id \
         JOIN users u ON u.id = e.user_id",
    )
    .bind(id)
    .bind(amount)
    .bind(kind.map(|k| k.as_str()))
    .bind(payment_date)
    .bind(status.map(|s| s.as_str()))
    .bind(payload.notes)
    .fetch_one(&state.pool)
    .await
    .map_err(|e| map_db_error(e, "payroll"))?;

    Ok(Json(row.into_response()))
}

/// DELETE /api/payroll/:id
pub async fn remove(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require_role(&[Role::Admin, Role::Hr])?;

    let result = sqlx::query("DELETE FROM payrolls WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await
        .map_err(|e| map_db_error(e, "payroll"))?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Payroll record not found"));
    }

    Ok(Json(json!({ "message": "Payroll record deleted successfully" })))
}

fn parse_positive_amount(raw: &Value) -> Result<Decimal, ApiError> {
    let amount = parse_decimal("Amount", raw)?;
    if amount <= Decimal::ZERO {
        return Err(ApiError::validation("Amount must be a positive number"));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_must_be_positive() {
        assert!(parse_positive_amount(&json!(1200)).is_ok());
        assert!(parse_positive_amount(&json!("0.01")).is_ok());
        assert!(parse_positive_amount(&json!(0)).is_err());
        assert!(parse_positive_amount(&json!(-50)).is_err());
        assert!(parse_positive_amount(&json!("free")).is_err());
    }
}
