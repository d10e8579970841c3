//! SQLite implementation of the database traits.
//!
//! This module provides a SQLite-backed implementation of the repository
//! traits defined in the parent module.

mod connection;
mod grade;
mod group;
mod helpers;
mod reports;
mod student;
mod subject;
mod teacher;

#[cfg(test)]
mod connection_test;
#[cfg(test)]
mod group_test;
#[cfg(test)]
mod reports_test;
#[cfg(test)]
mod student_test;
#[cfg(test)]
mod subject_test;

pub use connection::SqliteDatabase;
pub use grade::SqliteGradeRepository;
pub use group::SqliteGroupRepository;
pub use reports::SqliteReportRepository;
pub use student::SqliteStudentRepository;
pub use subject::SqliteSubjectRepository;
pub use teacher::SqliteTeacherRepository;
