//! SQLite implementation of the twelve analytical reports.
//!
//! Each method runs exactly one read-only aggregate query. Averages are
//! rounded in SQL where the report calls for a rounded figure; report 11
//! deliberately reports the unrounded average.

use sqlx::{Row, SqlitePool};

use super::helpers::db_err;
use crate::db::{
    DbResult, GradeSheetRow, GroupStudent, GroupSubjectAverage, LatestGrade, ReportRepository,
    StudentAverage, StudentSubjectAverage, StudentSubjects, StudentTeacherSubject,
    SubjectTopStudent, TeacherSubject, TeacherSubjectAverage,
};

/// SQLx-backed report repository.
pub struct SqliteReportRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl<'a> ReportRepository for SqliteReportRepository<'a> {
    async fn top_students(&self, limit: i64) -> DbResult<Vec<StudentAverage>> {
        let rows = sqlx::query(
            "SELECT s.id, s.fullname, ROUND(AVG(g.grade)) AS average_grade \
             FROM students s \
             JOIN grades g ON g.student_id = s.id \
             GROUP BY s.id \
             ORDER BY average_grade DESC \
             LIMIT ?",
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .map(|row| StudentAverage {
                student_id: row.get("id"),
                fullname: row.get("fullname"),
                average_grade: row.get("average_grade"),
            })
            .collect())
    }

    async fn subject_top_student(&self, subject_id: i64) -> DbResult<Option<SubjectTopStudent>> {
        let row = sqlx::query(
            "SELECT s.fullname, sub.name AS subject, ROUND(AVG(g.grade)) AS average_grade \
             FROM students s \
             JOIN grades g ON g.student_id = s.id \
             JOIN subjects sub ON sub.id = g.subject_id \
             WHERE g.subject_id = ? \
             GROUP BY s.id \
             ORDER BY average_grade DESC \
             LIMIT 1",
        )
        .bind(subject_id)
        .fetch_optional(self.pool)
        .await
        .map_err(db_err)?;

        Ok(row.map(|row| SubjectTopStudent {
            fullname: row.get("fullname"),
            subject: row.get("subject"),
            average_grade: row.get("average_grade"),
        }))
    }

    async fn group_subject_averages(
        &self,
        subject_id: i64,
    ) -> DbResult<Vec<GroupSubjectAverage>> {
        let rows = sqlx::query(
            "SELECT gr.name AS group_name, sub.name AS subject, \
                    ROUND(AVG(g.grade)) AS average_grade \
             FROM groups gr \
             JOIN students s ON s.group_id = gr.id \
             JOIN grades g ON g.student_id = s.id \
             JOIN subjects sub ON sub.id = g.subject_id \
             WHERE g.subject_id = ? \
             GROUP BY gr.name \
             ORDER BY average_grade DESC",
        )
        .bind(subject_id)
        .fetch_all(self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .map(|row| GroupSubjectAverage {
                group_name: row.get("group_name"),
                subject: row.get("subject"),
                average_grade: row.get("average_grade"),
            })
            .collect())
    }

    async fn global_average(&self) -> DbResult<Option<f64>> {
        sqlx::query_scalar("SELECT ROUND(AVG(grade)) FROM grades")
            .fetch_one(self.pool)
            .await
            .map_err(db_err)
    }

    async fn teacher_subjects(&self, teacher_id: i64) -> DbResult<Vec<TeacherSubject>> {
        let rows = sqlx::query(
            "SELECT t.fullname AS teacher, sub.name AS subject \
             FROM subjects sub \
             JOIN teachers t ON t.id = sub.teacher_id \
             WHERE t.id = ? \
             ORDER BY sub.name",
        )
        .bind(teacher_id)
        .fetch_all(self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .map(|row| TeacherSubject {
                teacher: row.get("teacher"),
                subject: row.get("subject"),
            })
            .collect())
    }

    async fn group_students(&self, group_name: &str) -> DbResult<Vec<GroupStudent>> {
        let rows = sqlx::query(
            "SELECT gr.name AS group_name, s.fullname \
             FROM students s \
             JOIN groups gr ON gr.id = s.group_id \
             WHERE gr.name = ? \
             ORDER BY s.fullname",
        )
        .bind(group_name)
        .fetch_all(self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .map(|row| GroupStudent {
                group_name: row.get("group_name"),
                fullname: row.get("fullname"),
            })
            .collect())
    }

    async fn group_subject_grades(
        &self,
        group_name: &str,
        subject_name: &str,
    ) -> DbResult<Vec<GradeSheetRow>> {
        let rows = sqlx::query(
            "SELECT s.fullname, sub.name AS subject, \
                    GROUP_CONCAT(g.grade, ', ') AS grades \
             FROM students s \
             JOIN grades g ON g.student_id = s.id \
             JOIN groups gr ON gr.id = s.group_id \
             JOIN subjects sub ON sub.id = g.subject_id \
             WHERE gr.name = ? AND sub.name = ? \
             GROUP BY s.fullname, sub.name \
             ORDER BY SUM(g.grade) DESC",
        )
        .bind(group_name)
        .bind(subject_name)
        .fetch_all(self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .map(|row| GradeSheetRow {
                fullname: row.get("fullname"),
                subject: row.get("subject"),
                grades: row.get("grades"),
            })
            .collect())
    }

    async fn teacher_subject_averages(
        &self,
        teacher_id: i64,
    ) -> DbResult<Vec<TeacherSubjectAverage>> {
        let rows = sqlx::query(
            "SELECT t.fullname AS teacher, sub.name AS subject, \
                    ROUND(AVG(g.grade)) AS average_grade \
             FROM teachers t \
             JOIN subjects sub ON sub.teacher_id = t.id \
             JOIN grades g ON g.subject_id = sub.id \
             WHERE sub.teacher_id = ? \
             GROUP BY t.fullname, sub.name",
        )
        .bind(teacher_id)
        .fetch_all(self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .map(|row| TeacherSubjectAverage {
                teacher: row.get("teacher"),
                subject: row.get("subject"),
                average_grade: row.get("average_grade"),
            })
            .collect())
    }

    async fn student_subjects(&self, student_id: i64) -> DbResult<Option<StudentSubjects>> {
        let rows = sqlx::query(
            "SELECT DISTINCT gr.name AS group_name, s.fullname, sub.name AS subject \
             FROM students s \
             JOIN groups gr ON gr.id = s.group_id \
             JOIN grades g ON g.student_id = s.id \
             JOIN subjects sub ON sub.id = g.subject_id \
             WHERE s.id = ? \
             ORDER BY sub.name",
        )
        .bind(student_id)
        .fetch_all(self.pool)
        .await
        .map_err(db_err)?;

        // Fold the distinct subject rows into a single comma-separated cell.
        let mut folded: Option<StudentSubjects> = None;
        for row in rows {
            let subject: String = row.get("subject");
            match folded.as_mut() {
                Some(entry) => {
                    entry.subjects.push_str(", ");
                    entry.subjects.push_str(&subject);
                }
                None => {
                    folded = Some(StudentSubjects {
                        group_name: row.get("group_name"),
                        fullname: row.get("fullname"),
                        subjects: subject,
                    });
                }
            }
        }

        Ok(folded)
    }

    async fn student_teacher_subjects(
        &self,
        student_id: i64,
        teacher_id: i64,
    ) -> DbResult<Vec<StudentTeacherSubject>> {
        let rows = sqlx::query(
            "SELECT DISTINCT s.fullname, sub.name AS subject, t.fullname AS teacher \
             FROM subjects sub \
             JOIN grades g ON g.subject_id = sub.id \
             JOIN students s ON s.id = g.student_id \
             JOIN teachers t ON t.id = sub.teacher_id \
             WHERE s.id = ? AND t.id = ? \
             ORDER BY sub.name",
        )
        .bind(student_id)
        .bind(teacher_id)
        .fetch_all(self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .map(|row| StudentTeacherSubject {
                fullname: row.get("fullname"),
                subject: row.get("subject"),
                teacher: row.get("teacher"),
            })
            .collect())
    }

    async fn student_teacher_averages(
        &self,
        student_id: i64,
        teacher_id: i64,
    ) -> DbResult<Vec<StudentSubjectAverage>> {
        let rows = sqlx::query(
            "SELECT s.fullname, t.fullname AS teacher, sub.name AS subject, \
                    AVG(g.grade) AS average_grade \
             FROM students s \
             JOIN grades g ON g.student_id = s.id \
             JOIN subjects sub ON sub.id = g.subject_id \
             JOIN teachers t ON t.id = sub.teacher_id \
             WHERE t.id = ? AND s.id = ? \
             GROUP BY s.fullname, t.fullname, sub.name",
        )
        .bind(teacher_id)
        .bind(student_id)
        .fetch_all(self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .map(|row| StudentSubjectAverage {
                fullname: row.get("fullname"),
                teacher: row.get("teacher"),
                subject: row.get("subject"),
                average_grade: row.get("average_grade"),
            })
            .collect())
    }

    async fn latest_group_grades(
        &self,
        group_id: i64,
        subject_id: i64,
    ) -> DbResult<Vec<LatestGrade>> {
        let rows = sqlx::query(
            "SELECT gr.name AS group_name, s.fullname, sub.name AS subject, \
                    g.grade, g.grade_date \
             FROM grades g \
             JOIN students s ON s.id = g.student_id \
             JOIN groups gr ON gr.id = s.group_id \
             JOIN subjects sub ON sub.id = g.subject_id \
             WHERE g.subject_id = ? AND gr.id = ? \
               AND g.grade_date = (SELECT MAX(g2.grade_date) \
                                   FROM grades g2 \
                                   JOIN students s2 ON s2.id = g2.student_id \
                                   WHERE g2.subject_id = ? AND s2.group_id = ?) \
             ORDER BY g.grade DESC",
        )
        .bind(subject_id)
        .bind(group_id)
        .bind(subject_id)
        .bind(group_id)
        .fetch_all(self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .map(|row| LatestGrade {
                group_name: row.get("group_name"),
                fullname: row.get("fullname"),
                subject: row.get("subject"),
                grade: row.get("grade"),
                grade_date: row.get("grade_date"),
            })
            .collect())
    }
}
