//! Database abstraction layer.
//!
//! Trait-based abstractions for data access, allowing different storage
//! backends to be swapped without changing business logic.
//!
//! - `error`: storage-agnostic error types
//! - `models`: domain entities (Teacher, Group, Student, Subject, Grade),
//!   field enumerations and report row types
//! - `repository`: trait definitions for data access
//! - `sqlite`: the SQLx-backed SQLite implementation

mod error;
pub mod models;
mod repository;
mod sqlite;
pub mod utils;


pub use error::{DbError, DbResult};
pub use models::*;
pub use repository::*;
pub use sqlite::SqliteDatabase;
