//! Subject CRUD commands.

use tabled::{Table, Tabled};
use tracing::info;

use crate::cli::error::{CliError, CliResult};
use crate::cli::utils::apply_table_style;
use crate::db::{Database, DbError, SubjectField, SubjectRepository};

#[derive(Tabled)]
struct SubjectDisplay {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Teacher ID")]
    teacher_id: i64,
}

pub async fn create(db: &impl Database, name: &str, teacher_id: i64) -> CliResult<String> {
    let id = db.subjects().create(name, teacher_id).await?;
    info!(id, name, teacher_id, "subject created");
    Ok(format!("New subject {} added with id {}", name, id))
}

pub async fn list(db: &impl Database) -> CliResult<String> {
    let subjects = db.subjects().list().await?;
    info!(count = subjects.len(), "subjects listed");

    if subjects.is_empty() {
        return Ok("No subjects found.".to_string());
    }

    let rows: Vec<SubjectDisplay> = subjects
        .iter()
        .map(|s| SubjectDisplay {
            id: s.id,
            name: s.name.clone(),
            teacher_id: s.teacher_id,
        })
        .collect();
    let mut table = Table::new(rows);
    apply_table_style(&mut table);
    Ok(table.to_string())
}

pub async fn update(db: &impl Database, id: i64, field: &str, value: &str) -> CliResult<String> {
    let field: SubjectField = field
        .parse()
        .map_err(|message| CliError::InvalidArgument { message })?;

    match db.subjects().set_field(id, field, value).await {
        Ok(()) => {
            info!(id, "subject updated");
            Ok(format!("Subject {} updated", id))
        }
        Err(DbError::NotFound { .. }) => {
            info!(id, "subject not found, nothing to update");
            Ok(format!("Subject {} not found", id))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn remove(db: &impl Database, id: i64) -> CliResult<String> {
    match db.subjects().delete(id).await {
        Ok(()) => {
            info!(id, "subject removed");
            Ok(format!("Subject {} removed", id))
        }
        Err(DbError::NotFound { .. }) => {
            info!(id, "subject not found, nothing to remove");
            Ok(format!("Subject {} not found", id))
        }
        Err(e) => Err(e.into()),
    }
}
