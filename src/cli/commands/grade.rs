//! Grade CRUD commands.

use chrono::NaiveDate;
use tabled::{Table, Tabled};
use tracing::info;

use crate::cli::error::{CliError, CliResult};
use crate::cli::utils::{apply_table_style, format_date};
use crate::db::{Database, DbError, GradeField, GradeRepository};

#[derive(Tabled)]
struct GradeDisplay {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Grade")]
    grade: i64,
    #[tabled(rename = "Date")]
    grade_date: String,
    #[tabled(rename = "Student ID")]
    student_id: i64,
    #[tabled(rename = "Subject ID")]
    subject_id: i64,
}

pub async fn create(
    db: &impl Database,
    grade: i64,
    grade_date: Option<NaiveDate>,
    student_id: i64,
    subject_id: i64,
) -> CliResult<String> {
    let id = db
        .grades()
        .create(grade, grade_date, student_id, subject_id)
        .await?;
    info!(id, grade, student_id, subject_id, "grade created");
    Ok(format!(
        "New grade {} recorded with id {} for student {}",
        grade, id, student_id
    ))
}

pub async fn list(db: &impl Database) -> CliResult<String> {
    let grades = db.grades().list().await?;
    info!(count = grades.len(), "grades listed");

    if grades.is_empty() {
        return Ok("No grades found.".to_string());
    }

    let rows: Vec<GradeDisplay> = grades
        .iter()
        .map(|g| GradeDisplay {
            id: g.id,
            grade: g.grade,
            grade_date: format_date(g.grade_date.as_ref()),
            student_id: g.student_id,
            subject_id: g.subject_id,
        })
        .collect();
    let mut table = Table::new(rows);
    apply_table_style(&mut table);
    Ok(table.to_string())
}

pub async fn update(db: &impl Database, id: i64, field: &str, value: &str) -> CliResult<String> {
    let field: GradeField = field
        .parse()
        .map_err(|message| CliError::InvalidArgument { message })?;

    match db.grades().set_field(id, field, value).await {
        Ok(()) => {
            info!(id, "grade updated");
            Ok(format!("Grade {} updated", id))
        }
        Err(DbError::NotFound { .. }) => {
            info!(id, "grade not found, nothing to update");
            Ok(format!("Grade {} not found", id))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn remove(db: &impl Database, id: i64) -> CliResult<String> {
    match db.grades().delete(id).await {
        Ok(()) => {
            info!(id, "grade removed");
            Ok(format!("Grade {} removed", id))
        }
        Err(DbError::NotFound { .. }) => {
            info!(id, "grade not found, nothing to remove");
            Ok(format!("Grade {} not found", id))
        }
        Err(e) => Err(e.into()),
    }
}
