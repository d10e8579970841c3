//! Tests for SqliteSubjectRepository.

use crate::db::{
    Database, DbError, SqliteDatabase, SubjectField, SubjectRepository, TeacherRepository,
};

async fn setup_db() -> SqliteDatabase {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Migration should succeed");
    db
}

#[tokio::test(flavor = "multi_thread")]
async fn create_and_get_subject() {
    let db = setup_db().await;

    let teacher_id = db.teachers().create("A Teacher").await.expect("teacher");
    let id = db
        .subjects()
        .create("Chemistry", teacher_id)
        .await
        .expect("Create should succeed");

    let subject = db.subjects().get(id).await.expect("Get should succeed");
    assert_eq!(subject.name, "Chemistry");
    assert_eq!(subject.teacher_id, teacher_id);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_with_dangling_teacher_is_rejected_and_rolled_back() {
    let db = setup_db().await;

    let result = db.subjects().create("Ghost Subject", 404).await;
    assert!(matches!(result, Err(DbError::Constraint { .. })));

    let subjects = db.subjects().list().await.expect("List should succeed");
    assert!(subjects.is_empty(), "store should be unchanged");
}

#[tokio::test(flavor = "multi_thread")]
async fn set_field_reassigns_teacher() {
    let db = setup_db().await;

    let first = db.teachers().create("First Teacher").await.expect("teacher");
    let second = db.teachers().create("Second Teacher").await.expect("teacher");
    let id = db
        .subjects()
        .create("History", first)
        .await
        .expect("subject");

    db.subjects()
        .set_field(id, SubjectField::TeacherId, &second.to_string())
        .await
        .expect("Update should succeed");

    let subject = db.subjects().get(id).await.expect("Get should succeed");
    assert_eq!(subject.teacher_id, second);
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_absent_subject_returns_not_found() {
    let db = setup_db().await;

    let result = db.subjects().delete(3).await;
    assert!(matches!(result, Err(DbError::NotFound { .. })));
}
