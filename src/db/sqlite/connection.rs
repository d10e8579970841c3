//! SQLite database connection and migration management.

use std::path::Path;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use super::{
    SqliteGradeRepository, SqliteGroupRepository, SqliteReportRepository,
    SqliteStudentRepository, SqliteSubjectRepository, SqliteTeacherRepository,
};
use crate::db::{Database, DbError, DbResult};

/// SQLite database implementation.
///
/// Holds the connection pool; repositories borrow it per operation, so every
/// verb releases its connection when the statement completes.
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Open a database at the given path, creating the file if missing.
    ///
    /// Foreign key enforcement is switched on for every pooled connection;
    /// referential integrity is the store's job, not re-validated in-process.
    pub async fn open<P: AsRef<Path>>(path: P, max_connections: u32) -> DbResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    /// Create an in-memory database (useful for testing).
    pub async fn in_memory() -> DbResult<Self> {
        // A fresh connection would get a fresh memory database, so the pool
        // is pinned to a single never-recycled connection.
        let options = SqliteConnectOptions::new()
            .in_memory(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    /// Access the underlying pool, for tests and advanced operations.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl Database for SqliteDatabase {
    type Teachers<'a> = SqliteTeacherRepository<'a>;
    type Groups<'a> = SqliteGroupRepository<'a>;
    type Students<'a> = SqliteStudentRepository<'a>;
    type Subjects<'a> = SqliteSubjectRepository<'a>;
    type Grades<'a> = SqliteGradeRepository<'a>;
    type Reports<'a> = SqliteReportRepository<'a>;

    async fn migrate(&self) -> DbResult<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| DbError::Migration {
                message: e.to_string(),
            })?;

        Ok(())
    }

    fn teachers(&self) -> Self::Teachers<'_> {
        SqliteTeacherRepository { pool: &self.pool }
    }

    fn groups(&self) -> Self::Groups<'_> {
        SqliteGroupRepository { pool: &self.pool }
    }

    fn students(&self) -> Self::Students<'_> {
        SqliteStudentRepository { pool: &self.pool }
    }

    fn subjects(&self) -> Self::Subjects<'_> {
        SqliteSubjectRepository { pool: &self.pool }
    }

    fn grades(&self) -> Self::Grades<'_> {
        SqliteGradeRepository { pool: &self.pool }
    }

    fn reports(&self) -> Self::Reports<'_> {
        SqliteReportRepository { pool: &self.pool }
    }
}
