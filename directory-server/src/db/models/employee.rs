//! Employee Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::models::Employee;

/// Stored employee document (record content, no id)
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
    pub position: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_joining: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Employee row as selected back from the store
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeRow {
    pub record_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
    pub position: String,
    #[serde(default)]
    pub salary: Option<f64>,
    #[serde(default)]
    pub date_of_joining: Option<NaiveDate>,
    #[serde(default)]
    pub profile_image: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Self {
            id: row.record_id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            department: row.department,
            position: row.position,
            salary: row.salary,
            date_of_joining: row.date_of_joining,
            profile_image: row.profile_image,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Validated create payload
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeCreate {
    pub first_name: String,
    pub last_name: String,
    /// Trimmed and lowercased
    pub email: String,
    pub department: String,
    pub position: String,
    pub salary: Option<f64>,
    pub date_of_joining: Option<NaiveDate>,
    pub profile_image: Option<String>,
}

/// Validated partial update; `None` leaves the stored value untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub salary: Option<f64>,
    pub date_of_joining: Option<NaiveDate>,
    pub profile_image: Option<String>,
}

/// MERGE document for an update
#[derive(Debug, Clone, Serialize)]
pub struct EmployeePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_joining: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    pub updated_at: i64,
}

impl EmployeeCreate {
    pub fn into_record(self, now: i64) -> EmployeeRecord {
        EmployeeRecord {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            department: self.department,
            position: self.position,
            salary: self.salary,
            date_of_joining: self.date_of_joining,
            profile_image: self.profile_image,
            created_at: now,
            updated_at: now,
        }
    }
}

impl EmployeeUpdate {
    pub fn into_patch(self, updated_at: i64) -> EmployeePatch {
        EmployeePatch {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            department: self.department,
            position: self.position,
            salary: self.salary,
            date_of_joining: self.date_of_joining,
            profile_image: self.profile_image,
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_only_carries_supplied_fields() {
        let patch = EmployeeUpdate {
            salary: Some(90000.0),
            ..Default::default()
        }
        .into_patch(42);

        let json = serde_json::to_value(&patch).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(obj["salary"], 90000.0);
        assert_eq!(obj["updated_at"], 42);
    }
}
