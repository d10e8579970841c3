//! Tests for SqliteGroupRepository.

use crate::db::{
    Database, DbError, GradeRepository, GroupField, GroupRepository, SqliteDatabase,
    StudentRepository, SubjectRepository, TeacherRepository,
};

async fn setup_db() -> SqliteDatabase {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Migration should succeed");
    db
}

#[tokio::test(flavor = "multi_thread")]
async fn create_and_get_group() {
    let db = setup_db().await;
    let repo = db.groups();

    let id = repo.create("Group A").await.expect("Create should succeed");
    assert!(id > 0);

    let group = repo.get(id).await.expect("Get should succeed");
    assert_eq!(group.name, "Group A");
}

#[tokio::test(flavor = "multi_thread")]
async fn set_field_renames_group() {
    let db = setup_db().await;
    let repo = db.groups();

    let id = repo.create("Group A").await.expect("Create should succeed");
    repo.set_field(id, GroupField::Name, "Group Z")
        .await
        .expect("Update should succeed");

    let group = repo.get(id).await.expect("Get should succeed");
    assert_eq!(group.name, "Group Z");
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_group_cascades_students_and_their_grades() {
    let db = setup_db().await;

    let group_id = db.groups().create("Group A").await.expect("group");
    let other_group = db.groups().create("Group B").await.expect("group");
    let teacher_id = db.teachers().create("A Teacher").await.expect("teacher");
    let subject_id = db
        .subjects()
        .create("Physics", teacher_id)
        .await
        .expect("subject");

    let doomed = db
        .students()
        .create("Doomed Student", group_id)
        .await
        .expect("student");
    let survivor = db
        .students()
        .create("Surviving Student", other_group)
        .await
        .expect("student");
    db.grades()
        .create(85, None, doomed, subject_id)
        .await
        .expect("grade");
    db.grades()
        .create(70, None, survivor, subject_id)
        .await
        .expect("grade");

    db.groups().delete(group_id).await.expect("Delete should succeed");

    let students = db.students().list().await.expect("List should succeed");
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].fullname, "Surviving Student");

    let grades = db.grades().list().await.expect("List should succeed");
    assert_eq!(grades.len(), 1);
    assert_eq!(grades[0].student_id, survivor);
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_absent_group_returns_not_found() {
    let db = setup_db().await;

    let result = db.groups().delete(12).await;
    assert!(matches!(result, Err(DbError::NotFound { .. })));
}
