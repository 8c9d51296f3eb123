use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

use crate::db::AppState;
use crate::error::{map_db_error, ApiError};
use crate::middleware::AuthUser;
use crate::models::contract::ContractRow;

/// GET /api/dashboard/overview - headline numbers plus recent activity
pub async fn overview(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let employee_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees")
        .fetch_one(&state.pool)
        .await
        .map_err(|e| map_db_error(e, "dashboard"))?;

    let active_contracts: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM contracts WHERE status = 'ACTIVE'")
            .fetch_one(&state.pool)
            .await
            .map_err(|e| map_db_error(e, "dashboard"))?;

    let pending_leaves: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM leaves WHERE status = 'PENDING'")
            .fetch_one(&state.pool)
            .await
            .map_err(|e| map_db_error(e, "dashboard"))?;

    let average_performance: f64 =
        sqlx::query_scalar("SELECT COALESCE(AVG(rating)::float8, 0) FROM performances")
            .fetch_one(&state.pool)
            .await
            .map_err(|e| map_db_error(e, "dashboard"))?;

    let recent = sqlx::query_as::<_, ContractRow>(
        "SELECT c.id, c.employee_id, c.type, c.start_date, c.end_date, \
                c.status, c.created_at, u.name AS user_name, u.email AS user_email \
         FROM contracts c \
         JOIN employees e ON e.id = c.employee_id \
         JOIN users u ON u.id = e.user_id \
         ORDER BY c.created_at DESC \
         LIMIT 5",
    )
    .fetch_all(&state.pool)
    .await
    .map_err(|e| map_db_error(e, "dashboard"))?;

    let recent_activities: Vec<_> = recent
        .into_iter()
        .map(|c| {
            json!({
                "id": c.id,
                "type": "CONTRACT",
                "employeeName": c.user_name,
                "date": c.created_at,
                "details": format!("New {} contract created", c.kind),
            })
        })
        .collect();

    Ok(Json(json!({
        "stats": {
            "employeeCount": employee_count,
            "activeContracts": active_contracts,
            "pendingLeaves": pending_leaves,
            "averagePerformance": average_performance,
        },
        "recentActivities": recent_activities,
    })))
}
