//! Tests for the report queries against a small deterministic fixture.

use chrono::NaiveDate;

use crate::db::{
    Database, GradeRepository, GroupRepository, ReportRepository, SqliteDatabase,
    StudentRepository, SubjectRepository, TeacherRepository,
};

struct Fixture {
    group_a: i64,
    teacher_1: i64,
    teacher_2: i64,
    math: i64,
    physics: i64,
    student_1: i64,
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Two groups, two teachers with one subject each, four students.
///
/// Per-student averages: Student One 90, Student Two 66.7, Student Three
/// 83.3, Student Four 70.
async fn seed_fixture(db: &SqliteDatabase) -> Fixture {
    let group_a = db.groups().create("Group A").await.expect("group");
    let group_b = db.groups().create("Group B").await.expect("group");

    let teacher_1 = db.teachers().create("Maria Curie").await.expect("teacher");
    let teacher_2 = db.teachers().create("Isaac Newton").await.expect("teacher");

    let math = db
        .subjects()
        .create("Mathematics", teacher_1)
        .await
        .expect("subject");
    let physics = db
        .subjects()
        .create("Physics", teacher_2)
        .await
        .expect("subject");

    let student_1 = db
        .students()
        .create("Student One", group_a)
        .await
        .expect("student");
    let student_2 = db
        .students()
        .create("Student Two", group_a)
        .await
        .expect("student");
    let student_3 = db
        .students()
        .create("Student Three", group_b)
        .await
        .expect("student");
    let student_4 = db
        .students()
        .create("Student Four", group_b)
        .await
        .expect("student");

    let grades = [
        (student_1, math, 100, date(2023, 5, 1)),
        (student_1, math, 90, date(2023, 9, 1)),
        (student_1, physics, 80, date(2023, 3, 1)),
        (student_2, math, 60, date(2023, 9, 1)),
        (student_2, physics, 70, date(2023, 4, 1)),
        (student_2, physics, 70, date(2023, 6, 1)),
        (student_3, math, 80, date(2023, 2, 1)),
        (student_3, math, 80, date(2023, 7, 1)),
        (student_3, physics, 90, date(2023, 8, 1)),
        (student_4, math, 70, date(2023, 1, 15)),
    ];
    for (student_id, subject_id, grade, grade_date) in grades {
        db.grades()
            .create(grade, Some(grade_date), student_id, subject_id)
            .await
            .expect("grade");
    }

    Fixture {
        group_a,
        teacher_1,
        teacher_2,
        math,
        physics,
        student_1,
    }
}

async fn setup_db() -> SqliteDatabase {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Migration should succeed");
    db
}

#[tokio::test(flavor = "multi_thread")]
async fn top_students_sorted_by_descending_average() {
    let db = setup_db().await;
    seed_fixture(&db).await;

    let rows = db.reports().top_students(3).await.expect("report");

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].fullname, "Student One");
    assert_eq!(rows[0].average_grade, 90.0);
    assert_eq!(rows[1].fullname, "Student Three");
    assert_eq!(rows[1].average_grade, 83.0);
    assert_eq!(rows[2].fullname, "Student Four");
    assert_eq!(rows[2].average_grade, 70.0);
}

#[tokio::test(flavor = "multi_thread")]
async fn top_students_on_empty_database_is_empty() {
    let db = setup_db().await;

    let rows = db.reports().top_students(5).await.expect("report");
    assert!(rows.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn subject_top_student_picks_highest_average() {
    let db = setup_db().await;
    let fx = seed_fixture(&db).await;

    let row = db
        .reports()
        .subject_top_student(fx.math)
        .await
        .expect("report")
        .expect("one row");

    assert_eq!(row.fullname, "Student One");
    assert_eq!(row.subject, "Mathematics");
    assert_eq!(row.average_grade, 95.0);
}

#[tokio::test(flavor = "multi_thread")]
async fn group_subject_averages_descend() {
    let db = setup_db().await;
    let fx = seed_fixture(&db).await;

    let rows = db
        .reports()
        .group_subject_averages(fx.math)
        .await
        .expect("report");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].group_name, "Group A");
    assert_eq!(rows[0].average_grade, 83.0);
    assert_eq!(rows[1].group_name, "Group B");
    assert_eq!(rows[1].average_grade, 77.0);
}

#[tokio::test(flavor = "multi_thread")]
async fn global_average_covers_every_grade() {
    let db = setup_db().await;
    seed_fixture(&db).await;

    let value = db.reports().global_average().await.expect("report");
    assert_eq!(value, Some(79.0));
}

#[tokio::test(flavor = "multi_thread")]
async fn global_average_on_empty_database_is_none() {
    let db = setup_db().await;

    let value = db.reports().global_average().await.expect("report");
    assert_eq!(value, None);
}

#[tokio::test(flavor = "multi_thread")]
async fn teacher_subjects_lists_only_that_teacher() {
    let db = setup_db().await;
    let fx = seed_fixture(&db).await;

    let rows = db
        .reports()
        .teacher_subjects(fx.teacher_1)
        .await
        .expect("report");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].teacher, "Maria Curie");
    assert_eq!(rows[0].subject, "Mathematics");
}

#[tokio::test(flavor = "multi_thread")]
async fn group_students_selected_by_name() {
    let db = setup_db().await;
    seed_fixture(&db).await;

    let rows = db
        .reports()
        .group_students("Group A")
        .await
        .expect("report");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].fullname, "Student One");
    assert_eq!(rows[1].fullname, "Student Two");
}

#[tokio::test(flavor = "multi_thread")]
async fn group_subject_grades_orders_by_grade_sum() {
    let db = setup_db().await;
    seed_fixture(&db).await;

    let rows = db
        .reports()
        .group_subject_grades("Group A", "Mathematics")
        .await
        .expect("report");

    assert_eq!(rows.len(), 2);
    // Student One holds 100+90, Student Two only 60.
    assert_eq!(rows[0].fullname, "Student One");
    assert!(rows[0].grades.contains("100"));
    assert!(rows[0].grades.contains("90"));
    assert_eq!(rows[1].fullname, "Student Two");
    assert_eq!(rows[1].grades, "60");
}

#[tokio::test(flavor = "multi_thread")]
async fn teacher_subject_averages_for_one_teacher() {
    let db = setup_db().await;
    let fx = seed_fixture(&db).await;

    let rows = db
        .reports()
        .teacher_subject_averages(fx.teacher_1)
        .await
        .expect("report");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].teacher, "Maria Curie");
    assert_eq!(rows[0].subject, "Mathematics");
    // (100 + 90 + 60 + 80 + 80 + 70) / 6
    assert_eq!(rows[0].average_grade, 80.0);
}

#[tokio::test(flavor = "multi_thread")]
async fn student_subjects_folds_into_one_row() {
    let db = setup_db().await;
    let fx = seed_fixture(&db).await;

    let row = db
        .reports()
        .student_subjects(fx.student_1)
        .await
        .expect("report")
        .expect("one row");

    assert_eq!(row.group_name, "Group A");
    assert_eq!(row.fullname, "Student One");
    assert_eq!(row.subjects, "Mathematics, Physics");
}

#[tokio::test(flavor = "multi_thread")]
async fn student_subjects_for_unknown_student_is_none() {
    let db = setup_db().await;
    seed_fixture(&db).await;

    let row = db.reports().student_subjects(999).await.expect("report");
    assert!(row.is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn student_teacher_subjects_joins_four_tables() {
    let db = setup_db().await;
    let fx = seed_fixture(&db).await;

    let rows = db
        .reports()
        .student_teacher_subjects(fx.student_1, fx.teacher_2)
        .await
        .expect("report");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].fullname, "Student One");
    assert_eq!(rows[0].subject, "Physics");
    assert_eq!(rows[0].teacher, "Isaac Newton");
}

#[tokio::test(flavor = "multi_thread")]
async fn student_teacher_averages_are_unrounded() {
    let db = setup_db().await;
    let fx = seed_fixture(&db).await;

    let rows = db
        .reports()
        .student_teacher_averages(fx.student_1, fx.teacher_1)
        .await
        .expect("report");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].subject, "Mathematics");
    assert_eq!(rows[0].average_grade, 95.0);
}

#[tokio::test(flavor = "multi_thread")]
async fn latest_group_grades_keep_only_max_date_rows() {
    let db = setup_db().await;
    let fx = seed_fixture(&db).await;

    let rows = db
        .reports()
        .latest_group_grades(fx.group_a, fx.math)
        .await
        .expect("report");

    // Both Group A math entries dated 2023-09-01 share the max date.
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.grade_date == Some(date(2023, 9, 1))));
    assert_eq!(rows[0].grade, 90);
    assert_eq!(rows[1].grade, 60);
}

#[tokio::test(flavor = "multi_thread")]
async fn latest_group_grades_ignore_other_subjects() {
    let db = setup_db().await;
    let fx = seed_fixture(&db).await;

    let rows = db
        .reports()
        .latest_group_grades(fx.group_a, fx.physics)
        .await
        .expect("report");

    // Group A physics max date is 2023-06-01, held by one grade.
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].grade, 70);
    assert_eq!(rows[0].grade_date, Some(date(2023, 6, 1)));
}
