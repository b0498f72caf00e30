//! Employee Repository

use super::{BaseRepository, RepoError, RepoResult, is_unique_violation, new_key, record_id};
use crate::db::models::{EmployeeCreate, EmployeeRow, EmployeeUpdate};
use crate::db::schema::EMPLOYEE_TABLE;
use crate::utils::time::{next_update_millis, now_millis};
use shared::models::{Employee, EmployeeQuery};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct EmployeeRepository {
    base: BaseRepository,
}

impl EmployeeRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All employees, newest created first
    pub async fn find_all(&self) -> RepoResult<Vec<Employee>> {
        self.search(&EmployeeQuery::default()).await
    }

    /// Employees matching every supplied filter (exact, case-sensitive)
    ///
    /// Empty filter values are ignored; no filters behaves like [`find_all`](Self::find_all).
    pub async fn search(&self, query: &EmployeeQuery) -> RepoResult<Vec<Employee>> {
        let department = query.department.clone().filter(|v| !v.is_empty());
        let position = query.position.clone().filter(|v| !v.is_empty());

        let mut conditions = Vec::new();
        if department.is_some() {
            conditions.push("department = $department");
        }
        if position.is_some() {
            conditions.push("position = $position");
        }
        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            "SELECT *, meta::id(id) AS record_id FROM employee{} ORDER BY created_at DESC",
            where_clause
        );

        let mut q = self.base.db().query(sql);
        if let Some(department) = department {
            q = q.bind(("department", department));
        }
        if let Some(position) = position {
            q = q.bind(("position", position));
        }

        let rows: Vec<EmployeeRow> = q.await?.take(0)?;
        Ok(rows.into_iter().map(Employee::from).collect())
    }

    /// Find employee by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Employee>> {
        Ok(self.find_row(id).await?.map(Employee::from))
    }

    /// Find employee by (normalized) email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Employee>> {
        let mut result = self
            .base
            .db()
            .query("SELECT *, meta::id(id) AS record_id FROM employee WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?;
        let rows: Vec<EmployeeRow> = result.take(0)?;
        Ok(rows.into_iter().next().map(Employee::from))
    }

    async fn find_row(&self, id: &str) -> RepoResult<Option<EmployeeRow>> {
        let mut result = self
            .base
            .db()
            .query("SELECT *, meta::id(id) AS record_id FROM $thing")
            .bind(("thing", record_id(EMPLOYEE_TABLE, id)))
            .await?;
        let rows: Vec<EmployeeRow> = result.take(0)?;
        Ok(rows.into_iter().next())
    }

    /// Create a new employee
    pub async fn create(&self, data: EmployeeCreate) -> RepoResult<Employee> {
        if self.find_by_email(&data.email).await?.is_some() {
            return Err(RepoError::Duplicate(data.email));
        }

        let key = new_key();
        let email = data.email.clone();
        let record = data.into_record(now_millis());

        self.base
            .db()
            .query("CREATE $thing CONTENT $content")
            .bind(("thing", record_id(EMPLOYEE_TABLE, &key)))
            .bind(("content", record))
            .await?
            .check()
            .map_err(|e| duplicate_or_database(e, &email))?;

        tracing::debug!(id = %key, "Employee created");

        self.find_by_id(&key)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create employee".to_string()))
    }

    /// Overwrite the supplied fields of an employee
    pub async fn update(&self, id: &str, data: EmployeeUpdate) -> RepoResult<Employee> {
        let existing = self
            .find_row(id)
            .await?
            .ok_or_else(|| not_found(id))?;

        if let Some(ref new_email) = data.email
            && new_email != &existing.email
            && self.find_by_email(new_email).await?.is_some()
        {
            return Err(RepoError::Duplicate(new_email.clone()));
        }

        let email = data.email.clone().unwrap_or_default();
        let patch = data.into_patch(next_update_millis(existing.updated_at));

        self.base
            .db()
            .query("UPDATE $thing MERGE $patch")
            .bind(("thing", record_id(EMPLOYEE_TABLE, id)))
            .bind(("patch", patch))
            .await?
            .check()
            .map_err(|e| duplicate_or_database(e, &email))?;

        self.find_by_id(id).await?.ok_or_else(|| not_found(id))
    }

    /// Hard delete an employee
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        self.find_row(id).await?.ok_or_else(|| not_found(id))?;

        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", record_id(EMPLOYEE_TABLE, id)))
            .await?
            .check()?;
        Ok(())
    }
}

fn not_found(id: &str) -> RepoError {
    RepoError::NotFound(format!("Employee {} not found", id))
}

fn duplicate_or_database(err: surrealdb::Error, email: &str) -> RepoError {
    if is_unique_violation(&err) {
        RepoError::Duplicate(email.to_string())
    } else {
        RepoError::from(err)
    }
}
