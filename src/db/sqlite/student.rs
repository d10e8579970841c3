//! SQLite StudentRepository implementation.

use sqlx::{Row, SqlitePool};

use super::helpers::{bind_field, db_err};
use crate::db::{DbError, DbResult, EntityKind, Student, StudentField, StudentRepository};

/// SQLx-backed student repository.
pub struct SqliteStudentRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl<'a> StudentRepository for SqliteStudentRepository<'a> {
    async fn create(&self, fullname: &str, group_id: i64) -> DbResult<i64> {
        let result = sqlx::query("INSERT INTO students (fullname, group_id) VALUES (?, ?)")
            .bind(fullname)
            .bind(group_id)
            .execute(self.pool)
            .await
            .map_err(db_err)?;

        Ok(result.last_insert_rowid())
    }

    async fn get(&self, id: i64) -> DbResult<Student> {
        let row = sqlx::query("SELECT id, fullname, group_id FROM students WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await
            .map_err(db_err)?;

        let row = row.ok_or(DbError::NotFound {
            kind: EntityKind::Student,
            id,
        })?;

        Ok(Student {
            id: row.get("id"),
            fullname: row.get("fullname"),
            group_id: row.get("group_id"),
        })
    }

    async fn list(&self) -> DbResult<Vec<Student>> {
        let rows = sqlx::query("SELECT id, fullname, group_id FROM students ORDER BY id")
            .fetch_all(self.pool)
            .await
            .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .map(|row| Student {
                id: row.get("id"),
                fullname: row.get("fullname"),
                group_id: row.get("group_id"),
            })
            .collect())
    }

    async fn set_field(&self, id: i64, field: StudentField, raw: &str) -> DbResult<()> {
        let value = field.parse_value(raw)?;
        let sql = format!("UPDATE students SET {} = ? WHERE id = ?", field.column());

        let result = bind_field(sqlx::query(&sql), &value)
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                kind: EntityKind::Student,
                id,
            });
        }

        Ok(())
    }

    async fn delete(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM students WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                kind: EntityKind::Student,
                id,
            });
        }

        Ok(())
    }
}
