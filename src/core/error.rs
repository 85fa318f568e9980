/// pgroster Error Module
///
/// This module defines the error types for the pgroster application.
/// It provides structured error handling with proper error propagation and
/// user-friendly error messages.
use thiserror::Error;

/// Error type covering every failure the application surfaces.
///
/// The taxonomy is deliberately small:
/// - `Database` wraps any storage-layer failure (a mutation that hit one of
///   these has already been rolled back by the repository)
/// - `DuplicateEmail` is the one storage rejection callers may want to
///   branch on: the unique constraint on `students.email`
/// - `Config` covers invalid connection settings before any session exists
///
/// "No row matched" is never an error; the repository reports it as a
/// plain `false`.
#[derive(Error, Debug)]
pub enum RosterError {
    /// Database-related errors from PostgreSQL operations
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Unique-constraint rejection on the student email column
    #[error("Duplicate email: {0}")]
    DuplicateEmail(String),

    /// Configuration loading and validation errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization errors from export output
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Type alias for Result to use RosterError as the error type.
pub type Result<T> = std::result::Result<T, RosterError>;
