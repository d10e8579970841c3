//! Database error types.
//!
//! Abstracted error types for database operations, storage-backend agnostic.
//! miette provides fancy diagnostic output, thiserror the derive macros.

use miette::Diagnostic;
use thiserror::Error;

use crate::db::models::EntityKind;

/// Database operation errors.
#[derive(Error, Diagnostic, Debug)]
pub enum DbError {
    #[error("{kind} with id {id} not found")]
    #[diagnostic(code(gradebook::db::not_found))]
    NotFound { kind: EntityKind, id: i64 },

    #[error("Invalid value for field '{field}': {message}")]
    #[diagnostic(code(gradebook::db::invalid_value))]
    InvalidValue { field: String, message: String },

    #[error("Constraint violation: {message}")]
    #[diagnostic(
        code(gradebook::db::constraint),
        help("Check that referenced rows exist; foreign keys cascade on delete.")
    )]
    Constraint { message: String },

    #[error("Database error: {message}")]
    #[diagnostic(code(gradebook::db::database_error))]
    Database { message: String },

    #[error("Migration error: {message}")]
    #[diagnostic(code(gradebook::db::migration_error))]
    Migration { message: String },

    #[error("Connection error: {message}")]
    #[diagnostic(code(gradebook::db::connection_error))]
    Connection { message: String },
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
