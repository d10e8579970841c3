//! Teacher CRUD commands.

use tabled::{Table, Tabled};
use tracing::info;

use crate::cli::error::{CliError, CliResult};
use crate::cli::utils::apply_table_style;
use crate::db::{Database, DbError, TeacherField, TeacherRepository};

#[derive(Tabled)]
struct TeacherDisplay {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Full Name")]
    fullname: String,
}

pub async fn create(db: &impl Database, fullname: &str) -> CliResult<String> {
    let id = db.teachers().create(fullname).await?;
    info!(id, fullname, "teacher created");
    Ok(format!("New teacher {} added with id {}", fullname, id))
}

pub async fn list(db: &impl Database) -> CliResult<String> {
    let teachers = db.teachers().list().await?;
    info!(count = teachers.len(), "teachers listed");

    if teachers.is_empty() {
        return Ok("No teachers found.".to_string());
    }

    let rows: Vec<TeacherDisplay> = teachers
        .iter()
        .map(|t| TeacherDisplay {
            id: t.id,
            fullname: t.fullname.clone(),
        })
        .collect();
    let mut table = Table::new(rows);
    apply_table_style(&mut table);
    Ok(table.to_string())
}

/// Set one field; an absent id is a logged no-op, not an error.
pub async fn update(db: &impl Database, id: i64, field: &str, value: &str) -> CliResult<String> {
    let field: TeacherField = field
        .parse()
        .map_err(|message| CliError::InvalidArgument { message })?;

    match db.teachers().set_field(id, field, value).await {
        Ok(()) => {
            info!(id, "teacher updated");
            Ok(format!("Teacher {} updated", id))
        }
        Err(DbError::NotFound { .. }) => {
            info!(id, "teacher not found, nothing to update");
            Ok(format!("Teacher {} not found", id))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn remove(db: &impl Database, id: i64) -> CliResult<String> {
    match db.teachers().delete(id).await {
        Ok(()) => {
            info!(id, "teacher removed");
            Ok(format!("Teacher {} removed", id))
        }
        Err(DbError::NotFound { .. }) => {
            info!(id, "teacher not found, nothing to remove");
            Ok(format!("Teacher {} not found", id))
        }
        Err(e) => Err(e.into()),
    }
}
