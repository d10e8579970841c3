//! Tests for SqliteStudentRepository.

use crate::db::{
    Database, DbError, GroupRepository, SqliteDatabase, StudentField, StudentRepository,
};

async fn setup_db() -> SqliteDatabase {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Migration should succeed");
    db
}

#[tokio::test(flavor = "multi_thread")]
async fn create_and_get_student() {
    let db = setup_db().await;

    let group_id = db.groups().create("Group A").await.expect("group");
    let id = db
        .students()
        .create("Grace Hopper", group_id)
        .await
        .expect("Create should succeed");
    assert!(id > 0);

    let student = db.students().get(id).await.expect("Get should succeed");
    assert_eq!(student.fullname, "Grace Hopper");
    assert_eq!(student.group_id, group_id);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_with_dangling_group_is_rejected_and_rolled_back() {
    let db = setup_db().await;

    let result = db.students().create("Orphan Student", 999).await;
    assert!(matches!(result, Err(DbError::Constraint { .. })));

    let students = db.students().list().await.expect("List should succeed");
    assert!(students.is_empty(), "store should be unchanged");
}

#[tokio::test(flavor = "multi_thread")]
async fn set_field_moves_student_between_groups() {
    let db = setup_db().await;

    let group_a = db.groups().create("Group A").await.expect("group");
    let group_b = db.groups().create("Group B").await.expect("group");
    let id = db
        .students()
        .create("Moving Student", group_a)
        .await
        .expect("student");

    db.students()
        .set_field(id, StudentField::GroupId, &group_b.to_string())
        .await
        .expect("Update should succeed");

    let student = db.students().get(id).await.expect("Get should succeed");
    assert_eq!(student.group_id, group_b);
}

#[tokio::test(flavor = "multi_thread")]
async fn set_field_to_dangling_group_is_rejected() {
    let db = setup_db().await;

    let group_id = db.groups().create("Group A").await.expect("group");
    let id = db
        .students()
        .create("Stuck Student", group_id)
        .await
        .expect("student");

    let result = db
        .students()
        .set_field(id, StudentField::GroupId, "999")
        .await;
    assert!(matches!(result, Err(DbError::Constraint { .. })));

    let student = db.students().get(id).await.expect("Get should succeed");
    assert_eq!(student.group_id, group_id, "row should be unchanged");
}

#[tokio::test(flavor = "multi_thread")]
async fn set_field_on_absent_id_returns_not_found() {
    let db = setup_db().await;

    let result = db
        .students()
        .set_field(5, StudentField::Fullname, "Nobody")
        .await;
    assert!(matches!(result, Err(DbError::NotFound { .. })));
}
