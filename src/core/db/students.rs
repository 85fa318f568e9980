//! Student repository over the `students` table.
//!
//! Each mutating operation runs in its own transaction: begin, execute,
//! then commit on success or roll back before the error is surfaced. The
//! store never leaves a transaction open across a call boundary, and it
//! never caches rows; every read goes to the backing table.
use crate::core::{Result, RosterError};
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::postgres::PgConnection;
use sqlx::Connection;
use tracing::{debug, error};

const LIST_SQL: &str = "\
SELECT student_id, first_name, last_name, email, enrollment_date
FROM students
ORDER BY student_id";

const INSERT_SQL: &str = "\
INSERT INTO students (first_name, last_name, email, enrollment_date)
VALUES ($1, $2, $3, $4)
RETURNING student_id";

const UPDATE_EMAIL_SQL: &str = "\
UPDATE students
SET email = $1
WHERE student_id = $2
RETURNING student_id";

const DELETE_SQL: &str = "\
DELETE FROM students
WHERE student_id = $1
RETURNING student_id";

/// One row of the `students` table.
///
/// `student_id` is assigned by the database on insert and never changes.
/// `enrollment_date` is optional at the schema level.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Student {
    pub student_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub enrollment_date: Option<NaiveDate>,
}

/// Repository for CRUD operations over students.
///
/// Owns the single database connection for the lifetime of the invocation.
pub struct StudentStore {
    conn: PgConnection,
}

impl StudentStore {
    pub fn new(conn: PgConnection) -> Self {
        StudentStore { conn }
    }

    /// Retrieves all students ordered by `student_id`.
    ///
    /// An empty result is success, not an error. Read-only, so no
    /// transaction scope is opened.
    pub async fn list(&mut self) -> Result<Vec<Student>> {
        let students = sqlx::query_as::<_, Student>(LIST_SQL)
            .fetch_all(&mut self.conn)
            .await?;
        debug!("fetched {} students", students.len());
        Ok(students)
    }

    /// Inserts a new student and returns the assigned `student_id`.
    ///
    /// The required fields are enforced by the table's NOT NULL constraints,
    /// not validated here. A duplicate email rolls back and surfaces as
    /// `RosterError::DuplicateEmail`; any other failure rolls back and
    /// surfaces as a database error.
    pub async fn create(
        &mut self,
        first_name: &str,
        last_name: &str,
        email: &str,
        enrollment_date: Option<NaiveDate>,
    ) -> Result<i32> {
        let mut tx = self.conn.begin().await?;
        let inserted = sqlx::query_scalar::<_, i32>(INSERT_SQL)
            .bind(first_name)
            .bind(last_name)
            .bind(email)
            .bind(enrollment_date)
            .fetch_one(&mut *tx)
            .await;

        match inserted {
            Ok(student_id) => {
                tx.commit().await?;
                debug!("inserted student_id={student_id}");
                Ok(student_id)
            }
            Err(err) => {
                tx.rollback().await?;
                error!("insert failed: {err}");
                Err(map_email_conflict(err, email))
            }
        }
    }

    /// Updates the email of the student with the given id, nothing else.
    ///
    /// Returns `true` if a row matched, `false` if no student has that id;
    /// the no-match case is a normal outcome and still commits (a no-op).
    /// A colliding email rolls back and surfaces as
    /// `RosterError::DuplicateEmail`.
    pub async fn update_email(&mut self, student_id: i32, new_email: &str) -> Result<bool> {
        let mut tx = self.conn.begin().await?;
        let updated = sqlx::query_scalar::<_, i32>(UPDATE_EMAIL_SQL)
            .bind(new_email)
            .bind(student_id)
            .fetch_optional(&mut *tx)
            .await;

        match updated {
            Ok(row) => {
                tx.commit().await?;
                debug!("update email for student_id={student_id}: matched={}", row.is_some());
                Ok(row.is_some())
            }
            Err(err) => {
                tx.rollback().await?;
                error!("update failed: {err}");
                Err(map_email_conflict(err, new_email))
            }
        }
    }

    /// Deletes the student with the given id.
    ///
    /// Returns `true` if a row was removed, `false` if no match.
    pub async fn delete(&mut self, student_id: i32) -> Result<bool> {
        let mut tx = self.conn.begin().await?;
        let deleted = sqlx::query_scalar::<_, i32>(DELETE_SQL)
            .bind(student_id)
            .fetch_optional(&mut *tx)
            .await;

        match deleted {
            Ok(row) => {
                tx.commit().await?;
                debug!("delete student_id={student_id}: matched={}", row.is_some());
                Ok(row.is_some())
            }
            Err(err) => {
                tx.rollback().await?;
                error!("delete failed: {err}");
                Err(RosterError::Database(err))
            }
        }
    }

    /// Closes the connection. Call once, after all operations complete.
    pub async fn close(self) -> Result<()> {
        self.conn.close().await?;
        Ok(())
    }
}

/// Separates unique-constraint rejections on the email column from other
/// storage failures.
fn map_email_conflict(err: sqlx::Error, email: &str) -> RosterError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            RosterError::DuplicateEmail(email.to_string())
        }
        _ => RosterError::Database(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_constraint_errors_stay_generic() {
        let err = map_email_conflict(sqlx::Error::RowNotFound, "ada@example.com");
        match err {
            RosterError::Database(_) => {}
            other => panic!("Expected Database error, got {other:?}"),
        }
    }

    #[test]
    fn test_student_serializes_with_nullable_date() {
        let student = Student {
            student_id: 1,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            enrollment_date: None,
        };
        let json = serde_json::to_value(&student).unwrap();
        assert_eq!(json["student_id"], 1);
        assert_eq!(json["enrollment_date"], serde_json::Value::Null);
    }
}
