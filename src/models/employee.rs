use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Employee row joined against its backing user (and optional manager name)
/// for display.
#[derive(Debug, Clone, FromRow)]
pub struct EmployeeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub position: String,
    pub department: String,
    pub start_date: NaiveDate,
    pub salary: Decimal,
    pub manager_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub user_name: String,
    pub user_email: String,
    pub user_role: String,
    pub manager_name: Option<String>,
}

impl EmployeeRow {
    pub fn into_response(self) -> EmployeeResponse {
        EmployeeResponse {
            id: self.id,
            user_id: self.user_id,
            position: self.position,
            department: self.department,
            start_date: self.start_date,
            salary: self.salary,
            manager_id: self.manager_id,
            created_at: self.created_at,
            user: UserRef {
                name: self.user_name,
                email: self.user_email,
                role: Some(self.user_role),
            },
            manager: self.manager_name.map(|name| ManagerRef {
                user: NameRef { name },
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub position: String,
    pub department: String,
    pub start_date: NaiveDate,
    pub salary: Decimal,
    pub manager_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub user: UserRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager: Option<ManagerRef>,
}

/// User projection embedded in entity responses: name and email, plus the
/// role where the employee listing shows it.
#[derive(Debug, Clone, Serialize)]
pub struct UserRef {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ManagerRef {
    pub user: NameRef,
}

#[derive(Debug, Clone, Serialize)]
pub struct NameRef {
    pub name: String,
}

/// The Employee→User projection every owned entity embeds for display.
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeRef {
    pub id: Uuid,
    pub user: UserRef,
}

impl EmployeeRef {
    pub fn new(id: Uuid, name: String, email: String) -> Self {
        Self {
            id,
            user: UserRef {
                name,
                email,
                role: None,
            },
        }
    }
}
