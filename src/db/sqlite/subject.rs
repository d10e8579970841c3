//! SQLite SubjectRepository implementation.

use sqlx::{Row, SqlitePool};

use super::helpers::{bind_field, db_err};
use crate::db::{DbError, DbResult, EntityKind, Subject, SubjectField, SubjectRepository};

/// SQLx-backed subject repository.
pub struct SqliteSubjectRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl<'a> SubjectRepository for SqliteSubjectRepository<'a> {
    async fn create(&self, name: &str, teacher_id: i64) -> DbResult<i64> {
        let result = sqlx::query("INSERT INTO subjects (name, teacher_id) VALUES (?, ?)")
            .bind(name)
            .bind(teacher_id)
            .execute(self.pool)
            .await
            .map_err(db_err)?;

        Ok(result.last_insert_rowid())
    }

    async fn get(&self, id: i64) -> DbResult<Subject> {
        let row = sqlx::query("SELECT id, name, teacher_id FROM subjects WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await
            .map_err(db_err)?;

        let row = row.ok_or(DbError::NotFound {
            kind: EntityKind::Subject,
            id,
        })?;

        Ok(Subject {
            id: row.get("id"),
            name: row.get("name"),
            teacher_id: row.get("teacher_id"),
        })
    }

    async fn list(&self) -> DbResult<Vec<Subject>> {
        let rows = sqlx::query("SELECT id, name, teacher_id FROM subjects ORDER BY id")
            .fetch_all(self.pool)
            .await
            .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .map(|row| Subject {
                id: row.get("id"),
                name: row.get("name"),
                teacher_id: row.get("teacher_id"),
            })
            .collect())
    }

    async fn set_field(&self, id: i64, field: SubjectField, raw: &str) -> DbResult<()> {
        let value = field.parse_value(raw)?;
        let sql = format!("UPDATE subjects SET {} = ? WHERE id = ?", field.column());

        let result = bind_field(sqlx::query(&sql), &value)
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                kind: EntityKind::Subject,
                id,
            });
        }

        Ok(())
    }

    async fn delete(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM subjects WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                kind: EntityKind::Subject,
                id,
            });
        }

        Ok(())
    }
}
