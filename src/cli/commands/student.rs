//! Student CRUD commands.

use tabled::{Table, Tabled};
use tracing::info;

use crate::cli::error::{CliError, CliResult};
use crate::cli::utils::apply_table_style;
use crate::db::{Database, DbError, StudentField, StudentRepository};

#[derive(Tabled)]
struct StudentDisplay {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Full Name")]
    fullname: String,
    #[tabled(rename = "Group ID")]
    group_id: i64,
}

pub async fn create(db: &impl Database, fullname: &str, group_id: i64) -> CliResult<String> {
    let id = db.students().create(fullname, group_id).await?;
    info!(id, fullname, group_id, "student created");
    Ok(format!("New student {} added with id {}", fullname, id))
}

pub async fn list(db: &impl Database) -> CliResult<String> {
    let students = db.students().list().await?;
    info!(count = students.len(), "students listed");

    if students.is_empty() {
        return Ok("No students found.".to_string());
    }

    let rows: Vec<StudentDisplay> = students
        .iter()
        .map(|s| StudentDisplay {
            id: s.id,
            fullname: s.fullname.clone(),
            group_id: s.group_id,
        })
        .collect();
    let mut table = Table::new(rows);
    apply_table_style(&mut table);
    Ok(table.to_string())
}

pub async fn update(db: &impl Database, id: i64, field: &str, value: &str) -> CliResult<String> {
    let field: StudentField = field
        .parse()
        .map_err(|message| CliError::InvalidArgument { message })?;

    match db.students().set_field(id, field, value).await {
        Ok(()) => {
            info!(id, "student updated");
            Ok(format!("Student {} updated", id))
        }
        Err(DbError::NotFound { .. }) => {
            info!(id, "student not found, nothing to update");
            Ok(format!("Student {} not found", id))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn remove(db: &impl Database, id: i64) -> CliResult<String> {
    match db.students().delete(id).await {
        Ok(()) => {
            info!(id, "student removed");
            Ok(format!("Student {} removed", id))
        }
        Err(DbError::NotFound { .. }) => {
            info!(id, "student not found, nothing to remove");
            Ok(format!("Student {} not found", id))
        }
        Err(e) => Err(e.into()),
    }
}
