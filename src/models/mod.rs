pub mod contract;
pub mod employee;
pub mod leave;
pub mod payroll;
pub mod performance;
pub mod training;
pub mod user;

pub use employee::{EmployeeRef, UserRef};
pub use user::Role;
