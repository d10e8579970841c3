//! SQLite TeacherRepository implementation.

use sqlx::{Row, SqlitePool};

use super::helpers::{bind_field, db_err};
use crate::db::{DbError, DbResult, EntityKind, Teacher, TeacherField, TeacherRepository};

/// SQLx-backed teacher repository.
pub struct SqliteTeacherRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl<'a> TeacherRepository for SqliteTeacherRepository<'a> {
    async fn create(&self, fullname: &str) -> DbResult<i64> {
        let result = sqlx::query("INSERT INTO teachers (fullname) VALUES (?)")
            .bind(fullname)
            .execute(self.pool)
            .await
            .map_err(db_err)?;

        Ok(result.last_insert_rowid())
    }

    async fn get(&self, id: i64) -> DbResult<Teacher> {
        let row = sqlx::query("SELECT id, fullname FROM teachers WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await
            .map_err(db_err)?;

        let row = row.ok_or(DbError::NotFound {
            kind: EntityKind::Teacher,
            id,
        })?;

        Ok(Teacher {
            id: row.get("id"),
            fullname: row.get("fullname"),
        })
    }

    async fn list(&self) -> DbResult<Vec<Teacher>> {
        let rows = sqlx::query("SELECT id, fullname FROM teachers ORDER BY id")
            .fetch_all(self.pool)
            .await
            .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .map(|row| Teacher {
                id: row.get("id"),
                fullname: row.get("fullname"),
            })
            .collect())
    }

    async fn set_field(&self, id: i64, field: TeacherField, raw: &str) -> DbResult<()> {
        let value = field.parse_value(raw)?;
        // Column name comes from the closed field enum, never from input.
        let sql = format!("UPDATE teachers SET {} = ? WHERE id = ?", field.column());

        let result = bind_field(sqlx::query(&sql), &value)
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                kind: EntityKind::Teacher,
                id,
            });
        }

        Ok(())
    }

    async fn delete(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM teachers WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                kind: EntityKind::Teacher,
                id,
            });
        }

        Ok(())
    }
}
