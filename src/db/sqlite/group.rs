//! SQLite GroupRepository implementation.

use sqlx::{Row, SqlitePool};

use super::helpers::{bind_field, db_err};
use crate::db::{DbError, DbResult, EntityKind, Group, GroupField, GroupRepository};

/// SQLx-backed group repository.
pub struct SqliteGroupRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl<'a> GroupRepository for SqliteGroupRepository<'a> {
    async fn create(&self, name: &str) -> DbResult<i64> {
        let result = sqlx::query("INSERT INTO groups (name) VALUES (?)")
            .bind(name)
            .execute(self.pool)
            .await
            .map_err(db_err)?;

        Ok(result.last_insert_rowid())
    }

    async fn get(&self, id: i64) -> DbResult<Group> {
        let row = sqlx::query("SELECT id, name FROM groups WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await
            .map_err(db_err)?;

        let row = row.ok_or(DbError::NotFound {
            kind: EntityKind::Group,
            id,
        })?;

        Ok(Group {
            id: row.get("id"),
            name: row.get("name"),
        })
    }

    async fn list(&self) -> DbResult<Vec<Group>> {
        let rows = sqlx::query("SELECT id, name FROM groups ORDER BY id")
            .fetch_all(self.pool)
            .await
            .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .map(|row| Group {
                id: row.get("id"),
                name: row.get("name"),
            })
            .collect())
    }

    async fn set_field(&self, id: i64, field: GroupField, raw: &str) -> DbResult<()> {
        let value = field.parse_value(raw)?;
        let sql = format!("UPDATE groups SET {} = ? WHERE id = ?", field.column());

        let result = bind_field(sqlx::query(&sql), &value)
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                kind: EntityKind::Group,
                id,
            });
        }

        Ok(())
    }

    async fn delete(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM groups WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                kind: EntityKind::Group,
                id,
            });
        }

        Ok(())
    }
}
