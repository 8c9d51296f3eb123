use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

use super::employee::EmployeeRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl TrainingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrainingStatus::NotStarted => "NOT_STARTED",
            TrainingStatus::InProgress => "IN_PROGRESS",
            TrainingStatus::Completed => "COMPLETED",
        }
    }
}

impl FromStr for TrainingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NOT_STARTED" => Ok(TrainingStatus::NotStarted),
            "IN_PROGRESS" => Ok(TrainingStatus::InProgress),
            "COMPLETED" => Ok(TrainingStatus::Completed),
            other => Err(format!("unknown training status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct TrainingRow {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub status: String,
    pub completion_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub user_name: String,
    pub user_email: String,
}

impl TrainingRow {
    pub fn into_response(self) -> TrainingResponse {
        TrainingResponse {
            id: self.id,
            employee_id: self.employee_id,
            title: self.title,
            description: self.description,
            start_date: self.start_date,
            status: self.status,
            completion_date: self.completion_date,
            created_at: self.created_at,
            employee: EmployeeRef::new(self.employee_id, self.user_name, self.user_email),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingResponse {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub status: String,
    pub completion_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub employee: EmployeeRef,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingStats {
    pub total: i64,
    pub completed: i64,
    pub in_progress: i64,
    pub not_started: i64,
}
