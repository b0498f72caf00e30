//! Employee API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use http::StatusCode;
use shared::models::{DeletedEmployee, Employee, EmployeeQuery};

use super::form::{EmployeeSubmission, validate_create, validate_update};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::EmployeeRepository;
use crate::utils::{ApiResponse, AppError, AppResult};

/// List all employees, newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Employee>>> {
    let repo = EmployeeRepository::new(state.get_db());
    let employees = repo.find_all().await.map_err(|e| state.repo_error(e))?;
    Ok(Json(employees))
}

/// Filter by department and/or position
pub async fn search(
    State(state): State<ServerState>,
    Query(query): Query<EmployeeQuery>,
) -> AppResult<Json<Vec<Employee>>> {
    let repo = EmployeeRepository::new(state.get_db());
    let employees = repo.search(&query).await.map_err(|e| state.repo_error(e))?;
    Ok(Json(employees))
}

/// Get employee by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Employee>> {
    let repo = EmployeeRepository::new(state.get_db());
    let employee = repo
        .find_by_id(&id)
        .await
        .map_err(|e| state.repo_error(e))?
        .ok_or_else(|| AppError::not_found("Employee").with_detail("id", id.clone()))?;
    Ok(Json(employee))
}

/// Create a new employee
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    submission: EmployeeSubmission,
) -> AppResult<(StatusCode, Json<Employee>)> {
    let mut data = validate_create(submission.fields)?;
    let repo = EmployeeRepository::new(state.get_db());

    if let Some(image) = submission.image {
        // Reject a taken email before the image touches the disk
        if repo
            .find_by_email(&data.email)
            .await
            .map_err(|e| state.repo_error(e))?
            .is_some()
        {
            return Err(AppError::duplicate_email(data.email));
        }
        data.profile_image = Some(state.images.save(image).await?);
    }

    let employee = repo.create(data).await.map_err(|e| state.repo_error(e))?;

    tracing::info!(id = %employee.id, user_id = %user.id, "Employee created");
    Ok((StatusCode::CREATED, Json(employee)))
}

/// Overwrite the supplied fields of an employee
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    submission: EmployeeSubmission,
) -> AppResult<Json<Employee>> {
    let mut data = validate_update(submission.fields)?;
    let repo = EmployeeRepository::new(state.get_db());

    if let Some(image) = submission.image {
        let existing = repo
            .find_by_id(&id)
            .await
            .map_err(|e| state.repo_error(e))?
            .ok_or_else(|| AppError::not_found("Employee").with_detail("id", id.clone()))?;
        if let Some(ref email) = data.email
            && email != &existing.email
            && repo
                .find_by_email(email)
                .await
                .map_err(|e| state.repo_error(e))?
                .is_some()
        {
            return Err(AppError::duplicate_email(email.clone()));
        }
        data.profile_image = Some(state.images.save(image).await?);
    }

    let employee = repo
        .update(&id, data)
        .await
        .map_err(|e| state.repo_error(e))?;

    tracing::info!(id = %employee.id, user_id = %user.id, "Employee updated");
    Ok(Json(employee))
}

/// Hard delete an employee
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<DeletedEmployee>>> {
    let repo = EmployeeRepository::new(state.get_db());
    repo.delete(&id).await.map_err(|e| state.repo_error(e))?;

    tracing::info!(id = %id, user_id = %user.id, "Employee deleted");
    Ok(Json(ApiResponse::success_with_message(
        "Employee deleted",
        DeletedEmployee { id },
    )))
}
