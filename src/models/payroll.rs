use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

use super::employee::EmployeeRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayrollType {
    Salary,
    Bonus,
    Advance,
    Other,
}

impl PayrollType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayrollType::Salary => "SALARY",
            PayrollType::Bonus => "BONUS",
            PayrollType::Advance => "ADVANCE",
            PayrollType::Other => "OTHER",
        }
    }
}

impl FromStr for PayrollType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SALARY" => Ok(PayrollType::Salary),
            "BONUS" => Ok(PayrollType::Bonus),
            "ADVANCE" => Ok(PayrollType::Advance),
            "OTHER" => Ok(PayrollType::Other),
            other => Err(format!("unknown payroll type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayrollStatus {
    Paid,
    Pending,
    Cancelled,
}

impl PayrollStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayrollStatus::Paid => "PAID",
            PayrollStatus::Pending => "PENDING",
            PayrollStatus::Cancelled => "CANCELLED",
        }
    }
}

impl FromStr for PayrollStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PAID" => Ok(PayrollStatus::Paid),
            "PENDING" => Ok(PayrollStatus::Pending),
            "CANCELLED" => Ok(PayrollStatus::Cancelled),
            other => Err(format!("unknown payroll status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct PayrollRow {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub amount: Decimal,
    #[sqlx(rename = "type")]
    pub kind: String,
    pub payment_date: NaiveDate,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub user_name: String,
    pub user_email: String,
}

impl PayrollRow {
    pub fn into_response(self) -> PayrollResponse {
        PayrollResponse {
            id: self.id,
            employee_id: self.employee_id,
            amount: self.amount,
            kind: self.kind,
            payment_date: self.payment_date,
            status: self.status,
            notes: self.notes,
            created_at: self.created_at,
            employee: EmployeeRef::new(self.employee_id, self.user_name, self.user_email),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollResponse {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: String,
    pub payment_date: NaiveDate,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub employee: EmployeeRef,
}

/// Aggregates returned alongside the payroll listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollStats {
    pub total_salaries: Decimal,
    pub total_bonuses: Decimal,
    pub average_salary: Decimal,
    pub employee_count: i64,
}
