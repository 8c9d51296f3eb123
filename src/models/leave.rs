use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

use super::employee::EmployeeRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveType {
    Vacation,
    Sick,
    Personal,
    Maternity,
    Paternity,
}

impl LeaveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveType::Vacation => "VACATION",
            LeaveType::Sick => "SICK",
            LeaveType::Personal => "PERSONAL",
            LeaveType::Maternity => "MATERNITY",
            LeaveType::Paternity => "PATERNITY",
        }
    }
}

impl FromStr for LeaveType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "VACATION" => Ok(LeaveType::Vacation),
            "SICK" => Ok(LeaveType::Sick),
            "PERSONAL" => Ok(LeaveType::Personal),
            "MATERNITY" => Ok(LeaveType::Maternity),
            "PATERNITY" => Ok(LeaveType::Paternity),
            other => Err(format!("unknown leave type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "PENDING",
            LeaveStatus::Approved => "APPROVED",
            LeaveStatus::Rejected => "REJECTED",
        }
    }
}

impl FromStr for LeaveStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(LeaveStatus::Pending),
            "APPROVED" => Ok(LeaveStatus::Approved),
            "REJECTED" => Ok(LeaveStatus::Rejected),
            other => Err(format!("unknown leave status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct LeaveRow {
    pub id: Uuid,
    pub employee_id: Uuid,
    #[sqlx(rename = "type")]
    pub kind: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: String,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub user_name: String,
    pub user_email: String,
}

impl LeaveRow {
    pub fn into_response(self) -> LeaveResponse {
        LeaveResponse {
            id: self.id,
            employee_id: self.employee_id,
            kind: self.kind,
            start_date: self.start_date,
            end_date: self.end_date,
            status: self.status,
            comment: self.comment,
            created_at: self.created_at,
            employee: EmployeeRef::new(self.employee_id, self.user_name, self.user_email),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveResponse {
    pub id: Uuid,
    pub employee_id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: String,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub employee: EmployeeRef,
}
