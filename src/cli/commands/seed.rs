//! Sample-data seeding.
//!
//! Populates an empty database with three groups, eight teachers, one
//! subject per teacher, and random students with random grades across 2023.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::cli::error::CliResult;
use crate::db::utils::current_date;
use crate::db::{
    Database, GradeRepository, GroupRepository, StudentRepository, SubjectRepository,
    TeacherRepository,
};

const GROUPS: [&str; 3] = ["Group A", "Group B", "Group C"];

const SUBJECTS: [&str; 8] = [
    "Mathematics",
    "Physics",
    "Chemistry",
    "Biology",
    "History",
    "Geography",
    "Literature",
    "Computer Science",
];

const FIRST_NAMES: [&str; 12] = [
    "Alice", "Borys", "Clara", "Daniel", "Elena", "Fedir", "Grace", "Henry", "Iryna", "Jakob",
    "Kateryna", "Liam",
];

const LAST_NAMES: [&str; 12] = [
    "Andersen",
    "Bondar",
    "Carver",
    "Dudek",
    "Eriksen",
    "Fischer",
    "Gruber",
    "Holub",
    "Ivanov",
    "Jensen",
    "Koval",
    "Lang",
];

fn random_name(rng: &mut StdRng) -> String {
    let first = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
    let last = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];
    format!("{} {}", first, last)
}

fn random_date(rng: &mut StdRng) -> NaiveDate {
    let month = rng.gen_range(1..=12);
    let day = rng.gen_range(1..=27);
    NaiveDate::from_ymd_opt(2023, month, day).unwrap_or_else(current_date)
}

pub async fn run(db: &impl Database, students: u32, grades_per_subject: u32) -> CliResult<String> {
    let mut rng = StdRng::from_entropy();

    let mut group_ids = Vec::with_capacity(GROUPS.len());
    for name in GROUPS {
        group_ids.push(db.groups().create(name).await?);
    }

    let mut teacher_ids = Vec::with_capacity(SUBJECTS.len());
    for _ in 0..SUBJECTS.len() {
        teacher_ids.push(db.teachers().create(&random_name(&mut rng)).await?);
    }

    // One subject per teacher, round-robin.
    let mut subject_ids = Vec::with_capacity(SUBJECTS.len());
    for (i, name) in SUBJECTS.iter().enumerate() {
        subject_ids.push(db.subjects().create(name, teacher_ids[i]).await?);
    }

    let mut student_ids = Vec::with_capacity(students as usize);
    for _ in 0..students {
        let group_id = group_ids[rng.gen_range(0..group_ids.len())];
        student_ids.push(db.students().create(&random_name(&mut rng), group_id).await?);
    }

    let mut grade_count = 0u32;
    for &student_id in &student_ids {
        for &subject_id in &subject_ids {
            for _ in 0..grades_per_subject {
                let grade = rng.gen_range(60..=100);
                let date = random_date(&mut rng);
                db.grades()
                    .create(grade, Some(date), student_id, subject_id)
                    .await?;
                grade_count += 1;
            }
        }
    }

    info!(
        groups = group_ids.len(),
        teachers = teacher_ids.len(),
        subjects = subject_ids.len(),
        students = student_ids.len(),
        grades = grade_count,
        "database seeded"
    );

    Ok(format!(
        "Seeded {} groups, {} teachers, {} subjects, {} students, {} grades",
        group_ids.len(),
        teacher_ids.len(),
        subject_ids.len(),
        student_ids.len(),
        grade_count
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::SqliteDatabase;

    #[tokio::test(flavor = "multi_thread")]
    async fn seed_populates_all_tables() {
        let db = SqliteDatabase::in_memory()
            .await
            .expect("Failed to create in-memory database");
        db.migrate().await.expect("Migration should succeed");

        let summary = run(&db, 10, 2).await.expect("Seed should succeed");
        assert!(summary.starts_with("Seeded 3 groups, 8 teachers, 8 subjects, 10 students"));

        assert_eq!(db.groups().list().await.expect("list").len(), 3);
        assert_eq!(db.teachers().list().await.expect("list").len(), 8);
        assert_eq!(db.subjects().list().await.expect("list").len(), 8);
        assert_eq!(db.students().list().await.expect("list").len(), 10);
        // 10 students * 8 subjects * 2 grades each.
        assert_eq!(db.grades().list().await.expect("list").len(), 160);

        for grade in db.grades().list().await.expect("list") {
            assert!((60..=100).contains(&grade.grade));
            assert!(grade.grade_date.is_some());
        }
    }
}
