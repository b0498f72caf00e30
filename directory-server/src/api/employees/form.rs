//! Employee input: extraction and validation
//!
//! Create and update accept either a JSON body or a `multipart/form-data`
//! form with an optional image file (`profile_image` or `profileImage`).

use axum::extract::{FromRequest, Json, Multipart, Request};
use http::header::CONTENT_TYPE;
use shared::models::EmployeeFields;

use crate::core::ServerState;
use crate::db::models::{EmployeeCreate, EmployeeUpdate};
use crate::services::ImageUpload;
use crate::utils::error::{from_json_rejection, from_multipart_error};
use crate::utils::time::parse_date;
use crate::utils::validation::{
    MAX_NAME_LEN, validate_email, validate_required_text, validate_salary,
};
use crate::utils::{AppError, AppResult};

/// Multipart file field names
const IMAGE_FIELDS: &[&str] = &["profile_image", "profileImage"];

/// Raw employee submission, before validation
#[derive(Debug, Default)]
pub struct EmployeeSubmission {
    pub fields: EmployeeFields,
    pub image: Option<ImageUpload>,
}

impl FromRequest<ServerState> for EmployeeSubmission {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &ServerState) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if is_multipart {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::invalid_request(e.body_text()))?;
            read_multipart(multipart).await
        } else {
            let Json(fields) = Json::<EmployeeFields>::from_request(req, state)
                .await
                .map_err(from_json_rejection)?;
            Ok(Self {
                fields,
                image: None,
            })
        }
    }
}

async fn read_multipart(mut multipart: Multipart) -> AppResult<EmployeeSubmission> {
    let mut submission = EmployeeSubmission::default();

    while let Some(field) = multipart.next_field().await.map_err(from_multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        if IMAGE_FIELDS.contains(&name.as_str()) {
            let file_name = field.file_name().map(str::to_string);
            let data = field.bytes().await.map_err(from_multipart_error)?;
            // Browsers send an empty part when no file was picked
            if !data.is_empty() {
                submission.image = Some(ImageUpload {
                    file_name,
                    data: data.to_vec(),
                });
            }
            continue;
        }

        let value = field.text().await.map_err(from_multipart_error)?;
        apply_text_field(&mut submission.fields, &name, value)?;
    }

    Ok(submission)
}

/// Copy one multipart text field into the payload
///
/// Empty `salary` and `date_of_joining` mean "not supplied".
fn apply_text_field(fields: &mut EmployeeFields, name: &str, value: String) -> AppResult<()> {
    match name {
        "first_name" => fields.first_name = Some(value),
        "last_name" => fields.last_name = Some(value),
        "email" => fields.email = Some(value),
        "department" => fields.department = Some(value),
        "position" => fields.position = Some(value),
        "salary" => {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                let salary = trimmed.parse::<f64>().map_err(|_| {
                    AppError::validation("salary must be a non-negative number")
                        .with_detail("field", "salary")
                })?;
                fields.salary = Some(salary);
            }
        }
        "date_of_joining" => {
            if !value.trim().is_empty() {
                fields.date_of_joining = Some(value);
            }
        }
        other => {
            return Err(
                AppError::validation(format!("Unknown field '{}'", other)).with_detail("field", other)
            );
        }
    }
    Ok(())
}

fn required(value: Option<String>, field: &str) -> AppResult<String> {
    match value {
        Some(v) => validate_required_text(&v, field, MAX_NAME_LEN),
        None => Err(AppError::validation(format!("{field} is required")).with_detail("field", field)),
    }
}

fn optional_text(value: Option<String>, field: &str) -> AppResult<Option<String>> {
    value
        .map(|v| validate_required_text(&v, field, MAX_NAME_LEN))
        .transpose()
}

/// Validate a create payload: the five text fields are mandatory
pub fn validate_create(fields: EmployeeFields) -> AppResult<EmployeeCreate> {
    Ok(EmployeeCreate {
        first_name: required(fields.first_name, "first_name")?,
        last_name: required(fields.last_name, "last_name")?,
        email: match fields.email {
            Some(email) => validate_email(&email, "email")?,
            None => {
                return Err(AppError::validation("email is required").with_detail("field", "email"));
            }
        },
        department: required(fields.department, "department")?,
        position: required(fields.position, "position")?,
        salary: fields.salary.map(validate_salary).transpose()?,
        date_of_joining: fields
            .date_of_joining
            .as_deref()
            .map(parse_date)
            .transpose()?,
        profile_image: None,
    })
}

/// Validate an update payload: only supplied fields are checked
pub fn validate_update(fields: EmployeeFields) -> AppResult<EmployeeUpdate> {
    Ok(EmployeeUpdate {
        first_name: optional_text(fields.first_name, "first_name")?,
        last_name: optional_text(fields.last_name, "last_name")?,
        email: fields
            .email
            .map(|email| validate_email(&email, "email"))
            .transpose()?,
        department: optional_text(fields.department, "department")?,
        position: optional_text(fields.position, "position")?,
        salary: fields.salary.map(validate_salary).transpose()?,
        date_of_joining: fields
            .date_of_joining
            .as_deref()
            .map(parse_date)
            .transpose()?,
        profile_image: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::ErrorCode;

    fn complete() -> EmployeeFields {
        EmployeeFields {
            first_name: Some(" Ada ".into()),
            last_name: Some("Lovelace".into()),
            email: Some("Ada@X.com".into()),
            department: Some("IT".into()),
            position: Some("Engineer".into()),
            salary: Some(120000.0),
            date_of_joining: Some("2024-03-01".into()),
        }
    }

    #[test]
    fn test_validate_create_normalizes() {
        let data = validate_create(complete()).unwrap();
        assert_eq!(data.first_name, "Ada");
        assert_eq!(data.email, "ada@x.com");
        assert_eq!(data.date_of_joining, NaiveDate::from_ymd_opt(2024, 3, 1));
    }

    #[test]
    fn test_validate_create_requires_fields() {
        for field in ["first_name", "last_name", "email", "department", "position"] {
            let mut fields = complete();
            match field {
                "first_name" => fields.first_name = None,
                "last_name" => fields.last_name = None,
                "email" => fields.email = None,
                "department" => fields.department = None,
                _ => fields.position = None,
            }
            let err = validate_create(fields).unwrap_err();
            assert_eq!(err.code, ErrorCode::ValidationFailed);
            assert_eq!(err.details.unwrap()["field"], field);
        }
    }

    #[test]
    fn test_validate_create_optional_fields() {
        let fields = EmployeeFields {
            salary: None,
            date_of_joining: None,
            ..complete()
        };
        let data = validate_create(fields).unwrap();
        assert!(data.salary.is_none());
        assert!(data.date_of_joining.is_none());
    }

    #[test]
    fn test_validate_create_rejects_bad_values() {
        let negative = EmployeeFields {
            salary: Some(-5.0),
            ..complete()
        };
        assert!(validate_create(negative).is_err());

        let bad_date = EmployeeFields {
            date_of_joining: Some("next tuesday".into()),
            ..complete()
        };
        assert!(validate_create(bad_date).is_err());

        let bad_email = EmployeeFields {
            email: Some("nope".into()),
            ..complete()
        };
        assert!(validate_create(bad_email).is_err());
    }

    #[test]
    fn test_validate_update_partial() {
        let update = validate_update(EmployeeFields {
            salary: Some(90000.0),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(update.salary, Some(90000.0));
        assert!(update.first_name.is_none());
        assert!(update.email.is_none());

        let blank = validate_update(EmployeeFields {
            department: Some("  ".into()),
            ..Default::default()
        });
        assert!(blank.is_err());
    }

    #[test]
    fn test_apply_text_field() {
        let mut fields = EmployeeFields::default();
        apply_text_field(&mut fields, "salary", "".into()).unwrap();
        apply_text_field(&mut fields, "date_of_joining", " ".into()).unwrap();
        assert!(fields.is_empty());

        apply_text_field(&mut fields, "salary", "85000.50".into()).unwrap();
        assert_eq!(fields.salary, Some(85000.5));

        assert!(apply_text_field(&mut fields, "salary", "lots".into()).is_err());
        let err = apply_text_field(&mut fields, "role", "admin".into()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
