//! SQLite GradeRepository implementation.

use chrono::NaiveDate;
use sqlx::{Row, SqlitePool};

use super::helpers::{bind_field, db_err};
use crate::db::{DbError, DbResult, EntityKind, Grade, GradeField, GradeRepository};

/// SQLx-backed grade repository.
pub struct SqliteGradeRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl<'a> GradeRepository for SqliteGradeRepository<'a> {
    async fn create(
        &self,
        grade: i64,
        grade_date: Option<NaiveDate>,
        student_id: i64,
        subject_id: i64,
    ) -> DbResult<i64> {
        let result = sqlx::query(
            "INSERT INTO grades (grade, grade_date, student_id, subject_id) VALUES (?, ?, ?, ?)",
        )
        .bind(grade)
        .bind(grade_date)
        .bind(student_id)
        .bind(subject_id)
        .execute(self.pool)
        .await
        .map_err(db_err)?;

        Ok(result.last_insert_rowid())
    }

    async fn get(&self, id: i64) -> DbResult<Grade> {
        let row = sqlx::query(
            "SELECT id, grade, grade_date, student_id, subject_id FROM grades WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(db_err)?;

        let row = row.ok_or(DbError::NotFound {
            kind: EntityKind::Grade,
            id,
        })?;

        Ok(Grade {
            id: row.get("id"),
            grade: row.get("grade"),
            grade_date: row.get("grade_date"),
            student_id: row.get("student_id"),
            subject_id: row.get("subject_id"),
        })
    }

    async fn list(&self) -> DbResult<Vec<Grade>> {
        let rows = sqlx::query(
            "SELECT id, grade, grade_date, student_id, subject_id FROM grades ORDER BY id",
        )
        .fetch_all(self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .map(|row| Grade {
                id: row.get("id"),
                grade: row.get("grade"),
                grade_date: row.get("grade_date"),
                student_id: row.get("student_id"),
                subject_id: row.get("subject_id"),
            })
            .collect())
    }

    async fn set_field(&self, id: i64, field: GradeField, raw: &str) -> DbResult<()> {
        let value = field.parse_value(raw)?;
        let sql = format!("UPDATE grades SET {} = ? WHERE id = ?", field.column());

        let result = bind_field(sqlx::query(&sql), &value)
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                kind: EntityKind::Grade,
                id,
            });
        }

        Ok(())
    }

    async fn delete(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM grades WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                kind: EntityKind::Grade,
                id,
            });
        }

        Ok(())
    }
}
