// Input parsing shared across resource handlers. Payload fields arrive as
// optional strings/values; parse failures map to 400s rather than the
// extractor's 422s so the client sees the original API's error shape.
use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::ApiError;

pub fn missing_fields() -> ApiError {
    ApiError::validation("Missing required fields")
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ApiError> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.date_naive())
        .map_err(|_| ApiError::validation(format!("Invalid date for {}", field)))
}

pub fn parse_uuid(field: &str, value: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(value).map_err(|_| ApiError::validation(format!("Invalid {}", field)))
}

/// Numeric payload field that may arrive as a JSON number or a string.
pub fn parse_decimal(field: &str, value: &Value) -> Result<Decimal, ApiError> {
    let parsed = match value {
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    };
    parsed.ok_or_else(|| ApiError::validation(format!("{} must be a valid number", field)))
}

/// Integer rating that may arrive as a JSON number or a string.
pub fn parse_int(field: &str, value: &Value) -> Result<i32, ApiError> {
    let parsed = match value {
        Value::Number(n) => n.as_i64().and_then(|v| i32::try_from(v).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| ApiError::validation(format!("{} must be a valid number", field)))
}

/// Enumerated payload field, e.g. a contract type or leave status.
pub fn parse_enum<T: FromStr>(label: &str, value: &str) -> Result<T, ApiError> {
    T::from_str(value).map_err(|_| ApiError::validation(format!("Invalid {}", label)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::contract::ContractType;
    use serde_json::json;

    #[test]
    fn dates_parse_both_formats() {
        assert_eq!(
            parse_date("startDate", "2024-03-01").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        assert_eq!(
            parse_date("startDate", "2024-03-01T09:30:00Z").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        assert!(parse_date("startDate", "01/03/2024").is_err());
    }

    #[test]
    fn decimals_accept_numbers_and_strings() {
        assert_eq!(
            parse_decimal("amount", &json!(1250.50)).unwrap(),
            Decimal::from_str("1250.5").unwrap()
        );
        assert_eq!(
            parse_decimal("amount", &json!("300")).unwrap(),
            Decimal::from(300)
        );
        assert!(parse_decimal("amount", &json!("not a number")).is_err());
        assert!(parse_decimal("amount", &json!(null)).is_err());
        assert!(parse_decimal("amount", &json!(true)).is_err());
    }

    #[test]
    fn ints_accept_numbers_and_strings() {
        assert_eq!(parse_int("rating", &json!(4)).unwrap(), 4);
        assert_eq!(parse_int("rating", &json!("3")).unwrap(), 3);
        assert!(parse_int("rating", &json!(2.5)).is_err());
        assert!(parse_int("rating", &json!("four")).is_err());
    }

    #[test]
    fn enums_map_to_validation_errors() {
        assert!(parse_enum::<ContractType>("contract type", "CDI").is_ok());
        let err = parse_enum::<ContractType>("contract type", "FOREVER").unwrap_err();
        assert_eq!(err.message(), "Invalid contract type");
    }

    #[test]
    fn uuids_map_to_validation_errors() {
        assert!(parse_uuid("employee ID", "0193c6a4-0000-7000-8000-000000000000").is_ok());
        assert!(parse_uuid("employee ID", "42").is_err());
    }
}
