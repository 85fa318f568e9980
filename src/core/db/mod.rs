/// Database Module
///
/// This module provides the database functionality for pgroster, split into
/// two concerns:
/// - **Connection Provider** (`connection.rs`): opens the single PostgreSQL
///   session from resolved settings
/// - **Student Repository** (`students.rs`): the four CRUD operations over
///   the `students` table, each mutation inside its own transaction scope
///
/// All operations use the standardized `RosterError` type for consistent
/// error propagation.
pub mod connection;
pub mod students;

pub use connection::connect;
pub use students::{Student, StudentStore};
