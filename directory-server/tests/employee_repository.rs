//! Repository tests against the in-memory store
//! Run: cargo test -p directory-server --test employee_repository

use std::time::Duration;

use chrono::NaiveDate;
use directory_server::db::DbService;
use directory_server::db::models::{EmployeeCreate, EmployeeUpdate, UserCreate};
use directory_server::db::repository::{EmployeeRepository, RepoError, UserRepository};
use shared::models::EmployeeQuery;

fn new_employee(first: &str, email: &str, department: &str, position: &str) -> EmployeeCreate {
    EmployeeCreate {
        first_name: first.to_string(),
        last_name: "Tester".to_string(),
        email: email.to_string(),
        department: department.to_string(),
        position: position.to_string(),
        salary: None,
        date_of_joining: None,
        profile_image: None,
    }
}

async fn employees() -> EmployeeRepository {
    let service = DbService::memory().await.unwrap();
    EmployeeRepository::new(service.db)
}

#[tokio::test]
async fn test_create_and_find() {
    let repo = employees().await;

    let mut data = new_employee("Ada", "ada@x.com", "IT", "Engineer");
    data.salary = Some(120000.0);
    data.date_of_joining = NaiveDate::from_ymd_opt(2024, 3, 1);
    let created = repo.create(data).await.unwrap();

    assert_eq!(created.first_name, "Ada");
    assert_eq!(created.salary, Some(120000.0));
    assert_eq!(created.date_of_joining, NaiveDate::from_ymd_opt(2024, 3, 1));
    assert_eq!(created.created_at, created.updated_at);

    let by_id = repo.find_by_id(&created.id).await.unwrap().unwrap();
    assert_eq!(by_id, created);

    let by_email = repo.find_by_email("ada@x.com").await.unwrap().unwrap();
    assert_eq!(by_email.id, created.id);

    assert!(repo.find_by_id("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let repo = employees().await;
    repo.create(new_employee("Ada", "ada@x.com", "IT", "Engineer"))
        .await
        .unwrap();

    let err = repo
        .create(new_employee("Other", "ada@x.com", "HR", "Clerk"))
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(ref email) if email == "ada@x.com"));
    assert_eq!(repo.find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_merges_supplied_fields() {
    let repo = employees().await;
    let created = repo
        .create(new_employee("Ada", "ada@x.com", "IT", "Engineer"))
        .await
        .unwrap();

    let updated = repo
        .update(
            &created.id,
            EmployeeUpdate {
                position: Some("Lead".to_string()),
                salary: Some(150000.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.position, "Lead");
    assert_eq!(updated.salary, Some(150000.0));
    assert_eq!(updated.first_name, created.first_name);
    assert_eq!(updated.email, created.email);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);

    // Empty update still moves updated_at forward
    let touched = repo
        .update(&created.id, EmployeeUpdate::default())
        .await
        .unwrap();
    assert!(touched.updated_at > updated.updated_at);
    assert_eq!(touched.position, "Lead");
}

#[tokio::test]
async fn test_update_email_conflicts() {
    let repo = employees().await;
    let ada = repo
        .create(new_employee("Ada", "ada@x.com", "IT", "Engineer"))
        .await
        .unwrap();
    let grace = repo
        .create(new_employee("Grace", "grace@x.com", "IT", "Admiral"))
        .await
        .unwrap();

    let err = repo
        .update(
            &grace.id,
            EmployeeUpdate {
                email: Some("ada@x.com".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));

    // Re-submitting your own email is not a conflict
    let same = repo
        .update(
            &ada.id,
            EmployeeUpdate {
                email: Some("ada@x.com".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(same.email, "ada@x.com");
}

#[tokio::test]
async fn test_update_and_delete_missing() {
    let repo = employees().await;

    let err = repo
        .update("missing", EmployeeUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));

    let err = repo.delete("missing").await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}

#[tokio::test]
async fn test_delete_removes_record() {
    let repo = employees().await;
    let created = repo
        .create(new_employee("Ada", "ada@x.com", "IT", "Engineer"))
        .await
        .unwrap();

    repo.delete(&created.id).await.unwrap();
    assert!(repo.find_by_id(&created.id).await.unwrap().is_none());

    // The email is free again
    repo.create(new_employee("Ada", "ada@x.com", "IT", "Engineer"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_search_filters_and_order() {
    let repo = employees().await;
    for (first, email, department, position) in [
        ("Ada", "ada@x.com", "IT", "Engineer"),
        ("Bob", "bob@x.com", "HR", "Manager"),
        ("Cy", "cy@x.com", "IT", "Manager"),
    ] {
        repo.create(new_employee(first, email, department, position))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let names = |list: Vec<shared::models::Employee>| -> Vec<String> {
        list.into_iter().map(|e| e.first_name).collect()
    };

    assert_eq!(names(repo.find_all().await.unwrap()), ["Cy", "Bob", "Ada"]);

    let it = repo
        .search(&EmployeeQuery {
            department: Some("IT".to_string()),
            position: None,
        })
        .await
        .unwrap();
    assert_eq!(names(it), ["Cy", "Ada"]);

    let managers = repo
        .search(&EmployeeQuery {
            department: Some(String::new()),
            position: Some("Manager".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(names(managers), ["Cy", "Bob"]);

    let lowercase = repo
        .search(&EmployeeQuery {
            department: Some("it".to_string()),
            position: None,
        })
        .await
        .unwrap();
    assert!(lowercase.is_empty());
}

#[tokio::test]
async fn test_user_repository() {
    let service = DbService::memory().await.unwrap();
    let users = UserRepository::new(service.db.clone());

    let created = users
        .create(UserCreate {
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password_hash: "$argon2id$placeholder".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(created.username, "alice");

    let found = users.find_by_email("a@x.com").await.unwrap().unwrap();
    assert_eq!(found.record_id, created.record_id);
    assert_eq!(found.password_hash, "$argon2id$placeholder");

    let by_id = users.find_by_id(&created.record_id).await.unwrap().unwrap();
    assert_eq!(by_id.email, "a@x.com");

    let err = users
        .create(UserCreate {
            username: "alice2".to_string(),
            email: "a@x.com".to_string(),
            password_hash: "x".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));

    // Employees and users share no email namespace
    let employees = EmployeeRepository::new(service.db);
    employees
        .create(new_employee("Alice", "a@x.com", "IT", "Engineer"))
        .await
        .unwrap();
}
