//! Integration tests for the student repository against a live PostgreSQL
//! server, driven by the same PG* environment variables as the binary.
//!
//! Each test works in its own throwaway schema so runs are isolated and
//! repeatable. The suite is ignored by default; run it with
//! `cargo test -- --ignored` against a disposable database.

use pgroster::config::ConnectionSettings;
use pgroster::core::db::{connect, StudentStore};
use pgroster::core::RosterError;
use pgroster::render;
use chrono::NaiveDate;

const STUDENTS_DDL: &str = "\
CREATE TABLE students (
    student_id SERIAL PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    enrollment_date DATE
)";

/// Opens a connection and rebuilds an isolated schema named after the test.
async fn fixture(name: &str) -> StudentStore {
    let settings = ConnectionSettings::from_env().expect("valid PG settings");
    let mut conn = connect(&settings)
        .await
        .expect("PostgreSQL server reachable");

    let schema = format!("pgroster_test_{name}");
    let setup = format!(
        "DROP SCHEMA IF EXISTS {schema} CASCADE;\n\
         CREATE SCHEMA {schema};\n\
         SET search_path TO {schema};\n\
         {STUDENTS_DDL}"
    );
    sqlx::raw_sql(&setup)
        .execute(&mut conn)
        .await
        .expect("schema setup");

    StudentStore::new(conn)
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL server"]
async fn test_create_then_list_returns_row_with_monotonic_id() {
    let mut store = fixture("create_list").await;

    let first_id = store
        .create("Ada", "Lovelace", "ada@example.com", None)
        .await
        .unwrap();
    let before: Vec<i32> = store
        .list()
        .await
        .unwrap()
        .iter()
        .map(|s| s.student_id)
        .collect();

    let second_id = store
        .create("Grace", "Hopper", "grace@example.com", None)
        .await
        .unwrap();
    assert!(before.iter().all(|&id| second_id > id));
    assert!(second_id > first_id);

    let students = store.list().await.unwrap();
    let grace = students
        .iter()
        .find(|s| s.student_id == second_id)
        .expect("created row is listed");
    assert_eq!(grace.first_name, "Grace");
    assert_eq!(grace.last_name, "Hopper");
    assert_eq!(grace.email, "grace@example.com");
    assert_eq!(grace.enrollment_date, None);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL server"]
async fn test_duplicate_email_on_create_rolls_back() {
    let mut store = fixture("dup_create").await;

    store
        .create("Ada", "Lovelace", "ada@example.com", None)
        .await
        .unwrap();
    let before = store.list().await.unwrap();

    let err = store
        .create("Augusta", "King", "ada@example.com", None)
        .await
        .unwrap_err();
    match err {
        RosterError::DuplicateEmail(email) => assert_eq!(email, "ada@example.com"),
        other => panic!("Expected DuplicateEmail, got {other:?}"),
    }

    // no partial row inserted
    assert_eq!(store.list().await.unwrap(), before);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL server"]
async fn test_update_email_on_missing_id_returns_false() {
    let mut store = fixture("update_missing").await;

    store
        .create("Ada", "Lovelace", "ada@example.com", None)
        .await
        .unwrap();
    let before = store.list().await.unwrap();

    let updated = store.update_email(9999, "nobody@example.com").await.unwrap();
    assert!(!updated);
    assert_eq!(store.list().await.unwrap(), before);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL server"]
async fn test_update_email_changes_only_that_field() {
    let mut store = fixture("update_email").await;

    let date = NaiveDate::from_ymd_opt(2024, 9, 1);
    let id = store
        .create("Ada", "Lovelace", "ada@example.com", date)
        .await
        .unwrap();

    let updated = store.update_email(id, "ada@analytics.com").await.unwrap();
    assert!(updated);

    let students = store.list().await.unwrap();
    assert_eq!(students.len(), 1);
    let ada = &students[0];
    assert_eq!(ada.student_id, id);
    assert_eq!(ada.first_name, "Ada");
    assert_eq!(ada.last_name, "Lovelace");
    assert_eq!(ada.email, "ada@analytics.com");
    assert_eq!(ada.enrollment_date, date);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL server"]
async fn test_update_email_to_existing_address_is_rejected() {
    let mut store = fixture("dup_update").await;

    store
        .create("Ada", "Lovelace", "ada@example.com", None)
        .await
        .unwrap();
    let grace_id = store
        .create("Grace", "Hopper", "grace@example.com", None)
        .await
        .unwrap();
    let before = store.list().await.unwrap();

    let err = store
        .update_email(grace_id, "ada@example.com")
        .await
        .unwrap_err();
    assert!(matches!(err, RosterError::DuplicateEmail(_)));
    assert_eq!(store.list().await.unwrap(), before);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL server"]
async fn test_delete_removes_exactly_one_row_once() {
    let mut store = fixture("delete").await;

    let ada_id = store
        .create("Ada", "Lovelace", "ada@example.com", None)
        .await
        .unwrap();
    let grace_id = store
        .create("Grace", "Hopper", "grace@example.com", None)
        .await
        .unwrap();

    assert!(store.delete(ada_id).await.unwrap());
    let students = store.list().await.unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].student_id, grace_id);

    // second delete of the same id is a normal negative outcome
    assert!(!store.delete(ada_id).await.unwrap());
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL server"]
async fn test_full_crud_scenario() {
    let mut store = fixture("full_scenario").await;

    let id = store
        .create("Ada", "Lovelace", "ada@example.com", None)
        .await
        .unwrap();
    assert_eq!(id, 1);

    let students = store.list().await.unwrap();
    assert_eq!(
        render::table(&students),
        "[  1] Ada Lovelace | ada@example.com | None"
    );

    assert!(store.update_email(1, "ada@analytics.com").await.unwrap());
    let students = store.list().await.unwrap();
    assert_eq!(
        render::table(&students),
        "[  1] Ada Lovelace | ada@analytics.com | None"
    );

    assert!(store.delete(1).await.unwrap());
    let students = store.list().await.unwrap();
    assert!(students.is_empty());
    assert_eq!(render::table(&students), "(no rows)");
}
