//! Group CRUD commands.

use tabled::{Table, Tabled};
use tracing::info;

use crate::cli::error::{CliError, CliResult};
use crate::cli::utils::apply_table_style;
use crate::db::{Database, DbError, GroupField, GroupRepository};

#[derive(Tabled)]
struct GroupDisplay {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
}

pub async fn create(db: &impl Database, name: &str) -> CliResult<String> {
    let id = db.groups().create(name).await?;
    info!(id, name, "group created");
    Ok(format!("New group {} created with id {}", name, id))
}

pub async fn list(db: &impl Database) -> CliResult<String> {
    let groups = db.groups().list().await?;
    info!(count = groups.len(), "groups listed");

    if groups.is_empty() {
        return Ok("No groups found.".to_string());
    }

    let rows: Vec<GroupDisplay> = groups
        .iter()
        .map(|g| GroupDisplay {
            id: g.id,
            name: g.name.clone(),
        })
        .collect();
    let mut table = Table::new(rows);
    apply_table_style(&mut table);
    Ok(table.to_string())
}

pub async fn update(db: &impl Database, id: i64, field: &str, value: &str) -> CliResult<String> {
    let field: GroupField = field
        .parse()
        .map_err(|message| CliError::InvalidArgument { message })?;

    match db.groups().set_field(id, field, value).await {
        Ok(()) => {
            info!(id, "group updated");
            Ok(format!("Group {} updated", id))
        }
        Err(DbError::NotFound { .. }) => {
            info!(id, "group not found, nothing to update");
            Ok(format!("Group {} not found", id))
        }
        Err(e) => Err(e.into()),
    }
}

/// Removing a group cascades to its students and their grades.
pub async fn remove(db: &impl Database, id: i64) -> CliResult<String> {
    match db.groups().delete(id).await {
        Ok(()) => {
            info!(id, "group removed");
            Ok(format!("Group {} removed", id))
        }
        Err(DbError::NotFound { .. }) => {
            info!(id, "group not found, nothing to remove");
            Ok(format!("Group {} not found", id))
        }
        Err(e) => Err(e.into()),
    }
}
