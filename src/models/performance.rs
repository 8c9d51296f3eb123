use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use super::employee::EmployeeRef;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

#[derive(Debug, Clone, FromRow)]
pub struct PerformanceRow {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub rating: i32,
    pub feedback: String,
    pub review_date: DateTime<Utc>,
    pub reviewer_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub user_name: String,
    pub user_email: String,
}

impl PerformanceRow {
    pub fn into_response(self) -> PerformanceResponse {
        PerformanceResponse {
            id: self.id,
            employee_id: self.employee_id,
            rating: self.rating,
            feedback: self.feedback,
            review_date: self.review_date,
            reviewer_id: self.reviewer_id,
            created_at: self.created_at,
            employee: EmployeeRef::new(self.employee_id, self.user_name, self.user_email),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceResponse {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub rating: i32,
    pub feedback: String,
    pub review_date: DateTime<Utc>,
    pub reviewer_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub employee: EmployeeRef,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceStats {
    pub average_rating: f64,
    pub total_reviews: i64,
}
