//! Shared helper functions for SQLite repositories.

use sqlx::Sqlite;
use sqlx::query::Query;
use sqlx::sqlite::SqliteArguments;

use crate::db::{DbError, models::FieldValue};

/// Map an sqlx error to a storage-agnostic [`DbError`].
///
/// Constraint failures (foreign key, NOT NULL, CHECK, UNIQUE) are surfaced
/// separately so callers can report them as data errors rather than
/// infrastructure failures.
pub(crate) fn db_err(e: sqlx::Error) -> DbError {
    match &e {
        sqlx::Error::Database(db)
            if db.is_foreign_key_violation()
                || db.is_unique_violation()
                || db.is_check_violation() =>
        {
            DbError::Constraint {
                message: db.message().to_string(),
            }
        }
        _ => DbError::Database {
            message: e.to_string(),
        },
    }
}

/// Bind a parsed field value with the encoding matching its variant.
pub(crate) fn bind_field<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: &'q FieldValue,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        FieldValue::Text(s) => query.bind(s.as_str()),
        FieldValue::Int(i) => query.bind(*i),
        FieldValue::Date(d) => query.bind(*d),
    }
}
