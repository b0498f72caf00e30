//! Database models
//!
//! Stored shapes and validated repository inputs. Rows are read with
//! `meta::id(id) AS record_id` so the key comes back as a plain string.

pub mod employee;
pub mod user;

pub use employee::{EmployeeCreate, EmployeePatch, EmployeeRecord, EmployeeRow, EmployeeUpdate};
pub use user::{UserCreate, UserRecord, UserRow};
