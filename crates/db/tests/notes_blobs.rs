//! Deleting a note removes its attachment blobs.

use std::sync::Arc;

use assert_matches::assert_matches;
use async_trait::async_trait;
use elearn_core::error::CoreError;
use elearn_core::roles::RoleSet;
use elearn_core::storage::{
    upload_key, BlobStore, LocalBlobStore, NOTES_COVER_PREFIX, NOTES_FILE_PREFIX,
};
use elearn_db::models::course::CreateCourse;
use elearn_db::models::notes::{CreateNote, Note};
use elearn_db::models::user::CreateUser;
use elearn_db::repositories::{CourseRepo, NotesRepo, UserRepo};
use elearn_db::DbError;
use sqlx::PgPool;
use tokio::sync::Notify;

async fn new_note(pool: &PgPool, file: Option<String>, cover: Option<String>) -> Note {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: "uploader".to_string(),
            first_name: None,
            last_name: None,
            email: None,
            password_hash: "hash".to_string(),
            roles: RoleSet::empty(),
        },
    )
    .await
    .unwrap();
    let course = CourseRepo::create(pool, &CreateCourse::new("Literature"))
        .await
        .unwrap();
    NotesRepo::create(
        pool,
        &CreateNote {
            title: "Reading list".to_string(),
            file,
            cover,
            course_id: course.id,
            user_id: user.id,
            is_public: None,
        },
    )
    .await
    .unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_removes_file_and_cover(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalBlobStore::new(dir.path());

    let file = upload_key(NOTES_FILE_PREFIX, "week1.pdf").unwrap();
    let cover = upload_key(NOTES_COVER_PREFIX, "week1.png").unwrap();
    store.put(&file, b"%PDF").await.unwrap();
    store.put(&cover, b"PNG").await.unwrap();

    let note = new_note(&pool, Some(file.clone()), Some(cover.clone())).await;

    assert!(NotesRepo::delete(&pool, &store, note.id).await.unwrap());

    assert!(!store.exists(&file).await.unwrap());
    assert!(!store.exists(&cover).await.unwrap());
    assert!(NotesRepo::find_by_id(&pool, note.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_without_attachments(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalBlobStore::new(dir.path());

    let note = new_note(&pool, None, None).await;
    assert!(NotesRepo::delete(&pool, &store, note.id).await.unwrap());
    assert!(!NotesRepo::delete(&pool, &store, note.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_tolerates_missing_blob(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalBlobStore::new(dir.path());

    let note = new_note(&pool, Some("notes/files/gone.pdf".into()), None).await;
    assert!(NotesRepo::delete(&pool, &store, note.id).await.unwrap());
}

/// A store whose deletes always fail.
struct BrokenStore;

#[async_trait]
impl BlobStore for BrokenStore {
    async fn put(&self, _key: &str, _bytes: &[u8]) -> Result<(), CoreError> {
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, CoreError> {
        Err(CoreError::Storage(format!("{key} unavailable")))
    }

    async fn exists(&self, _key: &str) -> Result<bool, CoreError> {
        Ok(true)
    }

    async fn delete(&self, key: &str) -> Result<(), CoreError> {
        Err(CoreError::Storage(format!("{key} is read-only")))
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failed_cleanup_keeps_row(pool: PgPool) {
    let note = new_note(&pool, Some("notes/files/locked.pdf".into()), None).await;

    let err = NotesRepo::delete(&pool, &BrokenStore, note.id)
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Storage(_)));
    assert!(NotesRepo::find_by_id(&pool, note.id).await.unwrap().is_some());
}

/// A store whose deletes pause until released, so a test can observe the
/// database while blob cleanup is in progress.
#[derive(Default)]
struct GatedStore {
    entered: Notify,
    release: Notify,
}

#[async_trait]
impl BlobStore for GatedStore {
    async fn put(&self, _key: &str, _bytes: &[u8]) -> Result<(), CoreError> {
        Ok(())
    }

    async fn get(&self, _key: &str) -> Result<Vec<u8>, CoreError> {
        Ok(Vec::new())
    }

    async fn exists(&self, _key: &str) -> Result<bool, CoreError> {
        Ok(true)
    }

    async fn delete(&self, _key: &str) -> Result<(), CoreError> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(())
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_row_locked_during_cleanup(pool: PgPool) {
    let note = new_note(&pool, Some("notes/files/slow.pdf".into()), None).await;
    let store = Arc::new(GatedStore::default());

    let task = {
        let pool = pool.clone();
        let store = Arc::clone(&store);
        tokio::spawn(async move { NotesRepo::delete(&pool, store.as_ref(), note.id).await })
    };
    store.entered.notified().await;

    // A writer cannot take the row while its blobs are being removed.
    let err = sqlx::query("SELECT id FROM notes WHERE id = $1 FOR UPDATE NOWAIT")
        .bind(note.id)
        .fetch_optional(&pool)
        .await
        .unwrap_err();
    let code = err.as_database_error().and_then(|e| e.code()).map(|c| c.into_owned());
    assert_eq!(code.as_deref(), Some("55P03"));

    store.release.notify_one();
    assert!(task.await.unwrap().unwrap());
    assert!(NotesRepo::find_by_id(&pool, note.id).await.unwrap().is_none());
}
