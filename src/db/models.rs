//! Domain models for the gradebook database.
//!
//! Storage-agnostic entity types, the closed set of entity kinds, the
//! per-entity field enumerations used by single-field updates, and the row
//! types produced by the report queries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::db::{DbError, DbResult};

/// The closed set of entity kinds managed by the CLI.
///
/// Dispatch over entities always goes through this enum; entity names coming
/// in from the command line are never evaluated as type references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Teacher,
    Group,
    Student,
    Subject,
    Grade,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EntityKind::Teacher => "Teacher",
            EntityKind::Group => "Group",
            EntityKind::Student => "Student",
            EntityKind::Subject => "Subject",
            EntityKind::Grade => "Grade",
        };
        write!(f, "{}", s)
    }
}

/// A teacher. Owns zero or more subjects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: i64,
    pub fullname: String,
}

/// A study group. Owns zero or more students.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    pub name: String,
}

/// A student. Belongs to exactly one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub fullname: String,
    pub group_id: i64,
}

/// A subject. Taught by exactly one teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: i64,
    pub name: String,
    pub teacher_id: i64,
}

/// A single grade entry for one student in one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grade {
    pub id: i64,
    pub grade: i64,
    pub grade_date: Option<NaiveDate>,
    pub student_id: i64,
    pub subject_id: i64,
}

// =============================================================================
// Field enumerations for single-field updates
// =============================================================================

/// A parsed value ready to be bound into an UPDATE statement.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Int(i64),
    Date(NaiveDate),
}

fn parse_int(field: &str, raw: &str) -> DbResult<FieldValue> {
    raw.parse::<i64>()
        .map(FieldValue::Int)
        .map_err(|_| DbError::InvalidValue {
            field: field.to_string(),
            message: format!("'{}' is not an integer", raw),
        })
}

fn parse_date(field: &str, raw: &str) -> DbResult<FieldValue> {
    raw.parse::<NaiveDate>()
        .map(FieldValue::Date)
        .map_err(|_| DbError::InvalidValue {
            field: field.to_string(),
            message: format!("'{}' is not a date (expected YYYY-MM-DD)", raw),
        })
}

/// Updatable fields of a teacher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeacherField {
    Fullname,
}

impl TeacherField {
    pub fn column(self) -> &'static str {
        match self {
            TeacherField::Fullname => "fullname",
        }
    }

    pub fn parse_value(self, raw: &str) -> DbResult<FieldValue> {
        match self {
            TeacherField::Fullname => Ok(FieldValue::Text(raw.to_string())),
        }
    }
}

impl std::str::FromStr for TeacherField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fullname" => Ok(TeacherField::Fullname),
            _ => Err(format!("Unknown teacher field: {}", s)),
        }
    }
}

/// Updatable fields of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupField {
    Name,
}

impl GroupField {
    pub fn column(self) -> &'static str {
        match self {
            GroupField::Name => "name",
        }
    }

    pub fn parse_value(self, raw: &str) -> DbResult<FieldValue> {
        match self {
            GroupField::Name => Ok(FieldValue::Text(raw.to_string())),
        }
    }
}

impl std::str::FromStr for GroupField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(GroupField::Name),
            _ => Err(format!("Unknown group field: {}", s)),
        }
    }
}

/// Updatable fields of a student.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentField {
    Fullname,
    GroupId,
}

impl StudentField {
    pub fn column(self) -> &'static str {
        match self {
            StudentField::Fullname => "fullname",
            StudentField::GroupId => "group_id",
        }
    }

    pub fn parse_value(self, raw: &str) -> DbResult<FieldValue> {
        match self {
            StudentField::Fullname => Ok(FieldValue::Text(raw.to_string())),
            StudentField::GroupId => parse_int(self.column(), raw),
        }
    }
}

impl std::str::FromStr for StudentField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fullname" => Ok(StudentField::Fullname),
            "group_id" => Ok(StudentField::GroupId),
            _ => Err(format!("Unknown student field: {}", s)),
        }
    }
}

/// Updatable fields of a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectField {
    Name,
    TeacherId,
}

impl SubjectField {
    pub fn column(self) -> &'static str {
        match self {
            SubjectField::Name => "name",
            SubjectField::TeacherId => "teacher_id",
        }
    }

    pub fn parse_value(self, raw: &str) -> DbResult<FieldValue> {
        match self {
            SubjectField::Name => Ok(FieldValue::Text(raw.to_string())),
            SubjectField::TeacherId => parse_int(self.column(), raw),
        }
    }
}

impl std::str::FromStr for SubjectField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SubjectField::Name),
            "teacher_id" => Ok(SubjectField::TeacherId),
            _ => Err(format!("Unknown subject field: {}", s)),
        }
    }
}

/// Updatable fields of a grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeField {
    Grade,
    GradeDate,
    StudentId,
    SubjectId,
}

impl GradeField {
    pub fn column(self) -> &'static str {
        match self {
            GradeField::Grade => "grade",
            GradeField::GradeDate => "grade_date",
            GradeField::StudentId => "student_id",
            GradeField::SubjectId => "subject_id",
        }
    }

    pub fn parse_value(self, raw: &str) -> DbResult<FieldValue> {
        match self {
            GradeField::Grade | GradeField::StudentId | GradeField::SubjectId => {
                parse_int(self.column(), raw)
            }
            GradeField::GradeDate => parse_date(self.column(), raw),
        }
    }
}

impl std::str::FromStr for GradeField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grade" => Ok(GradeField::Grade),
            "grade_date" => Ok(GradeField::GradeDate),
            "student_id" => Ok(GradeField::StudentId),
            "subject_id" => Ok(GradeField::SubjectId),
            _ => Err(format!("Unknown grade field: {}", s)),
        }
    }
}

// =============================================================================
// Report row types
// =============================================================================

/// One student with an averaged grade (reports 1 and 2).
#[derive(Debug, Clone, PartialEq)]
pub struct StudentAverage {
    pub student_id: i64,
    pub fullname: String,
    pub average_grade: f64,
}

/// Best student in a single subject (report 2).
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectTopStudent {
    pub fullname: String,
    pub subject: String,
    pub average_grade: f64,
}

/// Per-group average in one subject (report 3).
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSubjectAverage {
    pub group_name: String,
    pub subject: String,
    pub average_grade: f64,
}

/// Subject taught by a teacher (report 5).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeacherSubject {
    pub teacher: String,
    pub subject: String,
}

/// Group roster row (report 6).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupStudent {
    pub group_name: String,
    pub fullname: String,
}

/// Concatenated grade list per student and subject (report 7).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeSheetRow {
    pub fullname: String,
    pub subject: String,
    pub grades: String,
}

/// Per-subject average of one teacher (report 8).
#[derive(Debug, Clone, PartialEq)]
pub struct TeacherSubjectAverage {
    pub teacher: String,
    pub subject: String,
    pub average_grade: f64,
}

/// Distinct subjects of one student, folded into one cell (report 9).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentSubjects {
    pub group_name: String,
    pub fullname: String,
    pub subjects: String,
}

/// Subject and teacher pair of one student (report 10).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentTeacherSubject {
    pub fullname: String,
    pub subject: String,
    pub teacher: String,
}

/// Per-subject average for a student/teacher pair (report 11).
#[derive(Debug, Clone, PartialEq)]
pub struct StudentSubjectAverage {
    pub fullname: String,
    pub teacher: String,
    pub subject: String,
    pub average_grade: f64,
}

/// Latest-dated grade within a group+subject slice (report 12).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestGrade {
    pub group_name: String,
    pub fullname: String,
    pub subject: String,
    pub grade: i64,
    pub grade_date: Option<NaiveDate>,
}
