//! Repository traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing different
//! storage backends to be swapped without changing business logic. The
//! connection handle is injected through the owning [`Database`]; no
//! operation touches process-wide mutable state.

use chrono::NaiveDate;

use crate::db::{
    DbResult,
    models::{
        Grade, GradeField, GradeSheetRow, Group, GroupField, GroupStudent, GroupSubjectAverage,
        LatestGrade, Student, StudentAverage, StudentField, StudentSubjectAverage,
        StudentSubjects, StudentTeacherSubject, Subject, SubjectField, SubjectTopStudent,
        Teacher, TeacherField, TeacherSubject, TeacherSubjectAverage,
    },
};

/// Repository for Teacher operations.
pub trait TeacherRepository {
    /// Insert a teacher, returning the new row id.
    async fn create(&self, fullname: &str) -> DbResult<i64>;

    /// Get a teacher by id.
    async fn get(&self, id: i64) -> DbResult<Teacher>;

    /// Get all teachers ordered by id.
    async fn list(&self) -> DbResult<Vec<Teacher>>;

    /// Set a single field of a teacher.
    async fn set_field(&self, id: i64, field: TeacherField, raw: &str) -> DbResult<()>;

    /// Delete a teacher by id. Cascades to subjects and their grades.
    async fn delete(&self, id: i64) -> DbResult<()>;
}

/// Repository for Group operations.
pub trait GroupRepository {
    async fn create(&self, name: &str) -> DbResult<i64>;

    async fn get(&self, id: i64) -> DbResult<Group>;

    async fn list(&self) -> DbResult<Vec<Group>>;

    async fn set_field(&self, id: i64, field: GroupField, raw: &str) -> DbResult<()>;

    /// Delete a group by id. Cascades to students and their grades.
    async fn delete(&self, id: i64) -> DbResult<()>;
}

/// Repository for Student operations.
pub trait StudentRepository {
    /// Insert a student; `group_id` must reference an existing group.
    async fn create(&self, fullname: &str, group_id: i64) -> DbResult<i64>;

    async fn get(&self, id: i64) -> DbResult<Student>;

    async fn list(&self) -> DbResult<Vec<Student>>;

    async fn set_field(&self, id: i64, field: StudentField, raw: &str) -> DbResult<()>;

    async fn delete(&self, id: i64) -> DbResult<()>;
}

/// Repository for Subject operations.
pub trait SubjectRepository {
    /// Insert a subject; `teacher_id` must reference an existing teacher.
    async fn create(&self, name: &str, teacher_id: i64) -> DbResult<i64>;

    async fn get(&self, id: i64) -> DbResult<Subject>;

    async fn list(&self) -> DbResult<Vec<Subject>>;

    async fn set_field(&self, id: i64, field: SubjectField, raw: &str) -> DbResult<()>;

    async fn delete(&self, id: i64) -> DbResult<()>;
}

/// Repository for Grade operations.
pub trait GradeRepository {
    /// Insert a grade; both foreign keys must reference existing rows.
    async fn create(
        &self,
        grade: i64,
        grade_date: Option<NaiveDate>,
        student_id: i64,
        subject_id: i64,
    ) -> DbResult<i64>;

    async fn get(&self, id: i64) -> DbResult<Grade>;

    async fn list(&self) -> DbResult<Vec<Grade>>;

    async fn set_field(&self, id: i64, field: GradeField, raw: &str) -> DbResult<()>;

    async fn delete(&self, id: i64) -> DbResult<()>;
}

/// The twelve fixed analytical reports.
///
/// Fixed reporting shapes, not a query planner; each method maps to exactly
/// one read-only aggregate query.
pub trait ReportRepository {
    /// Report 1: top-N students by average grade across all subjects.
    async fn top_students(&self, limit: i64) -> DbResult<Vec<StudentAverage>>;

    /// Report 2: best student in one subject.
    async fn subject_top_student(&self, subject_id: i64) -> DbResult<Option<SubjectTopStudent>>;

    /// Report 3: per-group average in one subject, descending.
    async fn group_subject_averages(&self, subject_id: i64)
    -> DbResult<Vec<GroupSubjectAverage>>;

    /// Report 4: average grade over all students.
    async fn global_average(&self) -> DbResult<Option<f64>>;

    /// Report 5: subjects taught by one teacher.
    async fn teacher_subjects(&self, teacher_id: i64) -> DbResult<Vec<TeacherSubject>>;

    /// Report 6: students of a group, selected by group name.
    async fn group_students(&self, group_name: &str) -> DbResult<Vec<GroupStudent>>;

    /// Report 7: concatenated grades per student for one group and subject,
    /// ordered by descending grade sum.
    async fn group_subject_grades(
        &self,
        group_name: &str,
        subject_name: &str,
    ) -> DbResult<Vec<GradeSheetRow>>;

    /// Report 8: average grade per subject taught by one teacher.
    async fn teacher_subject_averages(
        &self,
        teacher_id: i64,
    ) -> DbResult<Vec<TeacherSubjectAverage>>;

    /// Report 9: distinct subjects of one student.
    async fn student_subjects(&self, student_id: i64) -> DbResult<Option<StudentSubjects>>;

    /// Report 10: distinct subject+teacher rows for a student/teacher pair.
    async fn student_teacher_subjects(
        &self,
        student_id: i64,
        teacher_id: i64,
    ) -> DbResult<Vec<StudentTeacherSubject>>;

    /// Report 11: average per subject for a student/teacher pair.
    async fn student_teacher_averages(
        &self,
        student_id: i64,
        teacher_id: i64,
    ) -> DbResult<Vec<StudentSubjectAverage>>;

    /// Report 12: latest-dated grades within one group+subject slice, via a
    /// correlated max-date subquery, ordered by descending grade.
    async fn latest_group_grades(
        &self,
        group_id: i64,
        subject_id: i64,
    ) -> DbResult<Vec<LatestGrade>>;
}

/// Combined database interface.
pub trait Database: Send + Sync {
    type Teachers<'a>: TeacherRepository
    where
        Self: 'a;
    type Groups<'a>: GroupRepository
    where
        Self: 'a;
    type Students<'a>: StudentRepository
    where
        Self: 'a;
    type Subjects<'a>: SubjectRepository
    where
        Self: 'a;
    type Grades<'a>: GradeRepository
    where
        Self: 'a;
    type Reports<'a>: ReportRepository
    where
        Self: 'a;

    /// Run pending migrations.
    async fn migrate(&self) -> DbResult<()>;

    fn teachers(&self) -> Self::Teachers<'_>;

    fn groups(&self) -> Self::Groups<'_>;

    fn students(&self) -> Self::Students<'_>;

    fn subjects(&self) -> Self::Subjects<'_>;

    fn grades(&self) -> Self::Grades<'_>;

    fn reports(&self) -> Self::Reports<'_>;
}
