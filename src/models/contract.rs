use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

use super::employee::EmployeeRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractType {
    Cdi,
    Cdd,
    Internship,
}

impl ContractType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractType::Cdi => "CDI",
            ContractType::Cdd => "CDD",
            ContractType::Internship => "INTERNSHIP",
        }
    }
}

impl FromStr for ContractType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CDI" => Ok(ContractType::Cdi),
            "CDD" => Ok(ContractType::Cdd),
            "INTERNSHIP" => Ok(ContractType::Internship),
            other => Err(format!("unknown contract type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractStatus {
    Active,
    Expired,
    Terminated,
}

impl ContractStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractStatus::Active => "ACTIVE",
            ContractStatus::Expired => "EXPIRED",
            ContractStatus::Terminated => "TERMINATED",
        }
    }
}

impl FromStr for ContractStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(ContractStatus::Active),
            "EXPIRED" => Ok(ContractStatus::Expired),
            "TERMINATED" => Ok(ContractStatus::Terminated),
            other => Err(format!("unknown contract status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct ContractRow {
    pub id: Uuid,
    pub employee_id: Uuid,
    #[sqlx(rename = "type")]
    pub kind: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub user_name: String,
    pub user_email: String,
}

impl ContractRow {
    pub fn into_response(self) -> ContractResponse {
        ContractResponse {
            id: self.id,
            employee_id: self.employee_id,
            kind: self.kind,
            start_date: self.start_date,
            end_date: self.end_date,
            status: self.status,
            created_at: self.created_at,
            employee: EmployeeRef::new(self.employee_id, self.user_name, self.user_email),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractResponse {
    pub id: Uuid,
    pub employee_id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub employee: EmployeeRef,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_enums_parse() {
        assert_eq!(ContractType::from_str("CDI").unwrap(), ContractType::Cdi);
        assert!(ContractType::from_str("PERMANENT").is_err());
        assert_eq!(
            ContractStatus::from_str("TERMINATED").unwrap().as_str(),
            "TERMINATED"
        );
    }
}
