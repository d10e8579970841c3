//! Report commands: render each analytical query as a grid table.
//!
//! Report execution failures never escape this module. They are logged and
//! the caller gets the empty table instead.

use tabled::{Table, Tabled};
use tracing::error;

use crate::cli::utils::{apply_table_style, format_average, format_date};
use crate::db::{
    Database, GradeSheetRow, GroupStudent, GroupSubjectAverage, LatestGrade, ReportRepository,
    StudentAverage, StudentSubjectAverage, StudentSubjects, StudentTeacherSubject,
    SubjectTopStudent, TeacherSubject, TeacherSubjectAverage,
};

const EMPTY_TABLE: &str = "No rows.";

fn render<T: Tabled>(rows: Vec<T>) -> String {
    if rows.is_empty() {
        return EMPTY_TABLE.to_string();
    }
    let mut table = Table::new(rows);
    apply_table_style(&mut table);
    table.to_string()
}

fn report_failed(report: &str, e: &crate::db::DbError) -> String {
    error!(report, error = %e, "report query failed");
    EMPTY_TABLE.to_string()
}

#[derive(Tabled)]
struct StudentAverageDisplay {
    #[tabled(rename = "Student Name")]
    fullname: String,
    #[tabled(rename = "Average Grade")]
    average_grade: String,
}

impl From<&StudentAverage> for StudentAverageDisplay {
    fn from(row: &StudentAverage) -> Self {
        Self {
            fullname: row.fullname.clone(),
            average_grade: format_average(row.average_grade),
        }
    }
}

/// Report 1: top-N students by average grade.
pub async fn top_students(db: &impl Database, limit: i64) -> String {
    match db.reports().top_students(limit).await {
        Ok(rows) => render(rows.iter().map(StudentAverageDisplay::from).collect()),
        Err(e) => report_failed("top_students", &e),
    }
}

#[derive(Tabled)]
struct SubjectTopStudentDisplay {
    #[tabled(rename = "Student Name")]
    fullname: String,
    #[tabled(rename = "Subject Name")]
    subject: String,
    #[tabled(rename = "Average Grade")]
    average_grade: String,
}

/// Report 2: best student in one subject.
pub async fn subject_top_student(db: &impl Database, subject_id: i64) -> String {
    match db.reports().subject_top_student(subject_id).await {
        Ok(row) => render(
            row.iter()
                .map(|r: &SubjectTopStudent| SubjectTopStudentDisplay {
                    fullname: r.fullname.clone(),
                    subject: r.subject.clone(),
                    average_grade: format_average(r.average_grade),
                })
                .collect(),
        ),
        Err(e) => report_failed("subject_top_student", &e),
    }
}

#[derive(Tabled)]
struct GroupSubjectAverageDisplay {
    #[tabled(rename = "Group Name")]
    group_name: String,
    #[tabled(rename = "Subject Name")]
    subject: String,
    #[tabled(rename = "Average Grade")]
    average_grade: String,
}

/// Report 3: per-group averages in one subject.
pub async fn group_subject_averages(db: &impl Database, subject_id: i64) -> String {
    match db.reports().group_subject_averages(subject_id).await {
        Ok(rows) => render(
            rows.iter()
                .map(|r: &GroupSubjectAverage| GroupSubjectAverageDisplay {
                    group_name: r.group_name.clone(),
                    subject: r.subject.clone(),
                    average_grade: format_average(r.average_grade),
                })
                .collect(),
        ),
        Err(e) => report_failed("group_subject_averages", &e),
    }
}

#[derive(Tabled)]
struct GlobalAverageDisplay {
    #[tabled(rename = "Average Grade")]
    average_grade: String,
}

/// Report 4: the average grade over all students.
pub async fn global_average(db: &impl Database) -> String {
    match db.reports().global_average().await {
        Ok(value) => render(
            value
                .iter()
                .map(|v| GlobalAverageDisplay {
                    average_grade: format_average(*v),
                })
                .collect(),
        ),
        Err(e) => report_failed("global_average", &e),
    }
}

#[derive(Tabled)]
struct TeacherSubjectDisplay {
    #[tabled(rename = "Teacher Name")]
    teacher: String,
    #[tabled(rename = "Subject Name")]
    subject: String,
}

/// Report 5: subjects taught by one teacher.
pub async fn teacher_subjects(db: &impl Database, teacher_id: i64) -> String {
    match db.reports().teacher_subjects(teacher_id).await {
        Ok(rows) => render(
            rows.iter()
                .map(|r: &TeacherSubject| TeacherSubjectDisplay {
                    teacher: r.teacher.clone(),
                    subject: r.subject.clone(),
                })
                .collect(),
        ),
        Err(e) => report_failed("teacher_subjects", &e),
    }
}

#[derive(Tabled)]
struct GroupStudentDisplay {
    #[tabled(rename = "Group Name")]
    group_name: String,
    #[tabled(rename = "Student Name")]
    fullname: String,
}

/// Report 6: roster of a group, selected by name.
pub async fn group_students(db: &impl Database, group_name: &str) -> String {
    match db.reports().group_students(group_name).await {
        Ok(rows) => render(
            rows.iter()
                .map(|r: &GroupStudent| GroupStudentDisplay {
                    group_name: r.group_name.clone(),
                    fullname: r.fullname.clone(),
                })
                .collect(),
        ),
        Err(e) => report_failed("group_students", &e),
    }
}

#[derive(Tabled)]
struct GradeSheetDisplay {
    #[tabled(rename = "Student Name")]
    fullname: String,
    #[tabled(rename = "Subject Name")]
    subject: String,
    #[tabled(rename = "Grades")]
    grades: String,
}

/// Report 7: concatenated grade list per student for one group and subject.
pub async fn group_subject_grades(
    db: &impl Database,
    group_name: &str,
    subject_name: &str,
) -> String {
    match db
        .reports()
        .group_subject_grades(group_name, subject_name)
        .await
    {
        Ok(rows) => render(
            rows.iter()
                .map(|r: &GradeSheetRow| GradeSheetDisplay {
                    fullname: r.fullname.clone(),
                    subject: r.subject.clone(),
                    grades: r.grades.clone(),
                })
                .collect(),
        ),
        Err(e) => report_failed("group_subject_grades", &e),
    }
}

#[derive(Tabled)]
struct TeacherSubjectAverageDisplay {
    #[tabled(rename = "Teacher Name")]
    teacher: String,
    #[tabled(rename = "Subject Name")]
    subject: String,
    #[tabled(rename = "Average Grade")]
    average_grade: String,
}

/// Report 8: per-subject averages of one teacher.
pub async fn teacher_subject_averages(db: &impl Database, teacher_id: i64) -> String {
    match db.reports().teacher_subject_averages(teacher_id).await {
        Ok(rows) => render(
            rows.iter()
                .map(|r: &TeacherSubjectAverage| TeacherSubjectAverageDisplay {
                    teacher: r.teacher.clone(),
                    subject: r.subject.clone(),
                    average_grade: format_average(r.average_grade),
                })
                .collect(),
        ),
        Err(e) => report_failed("teacher_subject_averages", &e),
    }
}

#[derive(Tabled)]
struct StudentSubjectsDisplay {
    #[tabled(rename = "Group Name")]
    group_name: String,
    #[tabled(rename = "Student Name")]
    fullname: String,
    #[tabled(rename = "Subject Names")]
    subjects: String,
}

/// Report 9: distinct subjects of one student.
pub async fn student_subjects(db: &impl Database, student_id: i64) -> String {
    match db.reports().student_subjects(student_id).await {
        Ok(row) => render(
            row.iter()
                .map(|r: &StudentSubjects| StudentSubjectsDisplay {
                    group_name: r.group_name.clone(),
                    fullname: r.fullname.clone(),
                    subjects: r.subjects.clone(),
                })
                .collect(),
        ),
        Err(e) => report_failed("student_subjects", &e),
    }
}

#[derive(Tabled)]
struct StudentTeacherSubjectDisplay {
    #[tabled(rename = "Student Name")]
    fullname: String,
    #[tabled(rename = "Subject Name")]
    subject: String,
    #[tabled(rename = "Teacher Name")]
    teacher: String,
}

/// Report 10: subject+teacher rows for a student/teacher pair.
pub async fn student_teacher_subjects(
    db: &impl Database,
    student_id: i64,
    teacher_id: i64,
) -> String {
    match db
        .reports()
        .student_teacher_subjects(student_id, teacher_id)
        .await
    {
        Ok(rows) => render(
            rows.iter()
                .map(|r: &StudentTeacherSubject| StudentTeacherSubjectDisplay {
                    fullname: r.fullname.clone(),
                    subject: r.subject.clone(),
                    teacher: r.teacher.clone(),
                })
                .collect(),
        ),
        Err(e) => report_failed("student_teacher_subjects", &e),
    }
}

#[derive(Tabled)]
struct StudentSubjectAverageDisplay {
    #[tabled(rename = "Student Name")]
    fullname: String,
    #[tabled(rename = "Teacher Name")]
    teacher: String,
    #[tabled(rename = "Subject Name")]
    subject: String,
    #[tabled(rename = "Average Grade")]
    average_grade: String,
}

/// Report 11: per-subject averages for a student/teacher pair (unrounded).
pub async fn student_teacher_averages(
    db: &impl Database,
    student_id: i64,
    teacher_id: i64,
) -> String {
    match db
        .reports()
        .student_teacher_averages(student_id, teacher_id)
        .await
    {
        Ok(rows) => render(
            rows.iter()
                .map(|r: &StudentSubjectAverage| StudentSubjectAverageDisplay {
                    fullname: r.fullname.clone(),
                    teacher: r.teacher.clone(),
                    subject: r.subject.clone(),
                    average_grade: format_average(r.average_grade),
                })
                .collect(),
        ),
        Err(e) => report_failed("student_teacher_averages", &e),
    }
}

#[derive(Tabled)]
struct LatestGradeDisplay {
    #[tabled(rename = "Group Name")]
    group_name: String,
    #[tabled(rename = "Student Name")]
    fullname: String,
    #[tabled(rename = "Subject Name")]
    subject: String,
    #[tabled(rename = "Grade")]
    grade: i64,
    #[tabled(rename = "Grade Date")]
    grade_date: String,
}

/// Report 12: latest-dated grades within one group+subject slice.
pub async fn latest_group_grades(db: &impl Database, group_id: i64, subject_id: i64) -> String {
    match db.reports().latest_group_grades(group_id, subject_id).await {
        Ok(rows) => render(
            rows.iter()
                .map(|r: &LatestGrade| LatestGradeDisplay {
                    group_name: r.group_name.clone(),
                    fullname: r.fullname.clone(),
                    subject: r.subject.clone(),
                    grade: r.grade,
                    grade_date: format_date(r.grade_date.as_ref()),
                })
                .collect(),
        ),
        Err(e) => report_failed("latest_group_grades", &e),
    }
}
