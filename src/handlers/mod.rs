pub mod auth;
pub mod contracts;
pub mod dashboard;
pub mod employees;
pub mod leaves;
pub mod pages;
pub mod payroll;
pub mod performance;
pub mod training;
pub mod utils;
