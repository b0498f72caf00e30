//! Employee Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Employee record as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
    pub position: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    /// Calendar date, `YYYY-MM-DD` on the wire
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_joining: Option<NaiveDate>,
    /// Public path of the stored profile image (`/uploads/<file>`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Employee create/update payload
///
/// Every field is optional on the wire. Create requires the five
/// text fields, update applies whatever is present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmployeeFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    /// Validated server-side as `YYYY-MM-DD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_joining: Option<String>,
}

impl EmployeeFields {
    /// True when no field is supplied
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Search filters (exact match, empty values ignored)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

/// Delete confirmation payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedEmployee {
    pub id: String,
}
