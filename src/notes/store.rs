use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Row};
use uuid::Uuid;

use crate::db::{self, DB};

use super::model::{Category, CreatedAt, InsertAck, NewNote, Note, UserId};

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("not_found")]
    NotFound,
    #[error("store read failed")]
    Read(#[source] BoxError),
    #[error("store write failed")]
    Write(#[source] BoxError),
    #[error("store delete failed")]
    Delete(#[source] BoxError),
}

impl StoreError {
    pub fn read(err: impl Into<BoxError>) -> Self {
        Self::Read(err.into())
    }

    pub fn write(err: impl Into<BoxError>) -> Self {
        Self::Write(err.into())
    }

    pub fn delete(err: impl Into<BoxError>) -> Self {
        Self::Delete(err.into())
    }
}

/// Durable storage of note records, queried by owner id. The HTTP surface
/// and the in-memory list controller are agnostic to which adapter backs it.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// All notes owned by `user_id`, newest first.
    async fn query(&self, user_id: &UserId) -> Result<Vec<Note>>;

    /// Persists a record. The store assigns the id and, when it has a clock
    /// of its own, the authoritative creation time.
    async fn insert(&self, record: &NewNote) -> Result<InsertAck>;

    async fn delete(&self, id: Uuid) -> Result<()>;

    async fn set_pinned(&self, id: Uuid, pinned: bool) -> Result<()>;
}

const NOTE_COLUMNS: &str = "id, title, content, attachment, category, color, is_pinned, user_id, created_at";

impl<'a> TryFrom<&Row<'a>> for Note {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'a>) -> std::result::Result<Self, Self::Error> {
        let category: String = row.get(4)?;
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            content: row.get(2)?,
            attachment: row.get(3)?,
            category: category.parse().unwrap_or(Category::Uncategorized),
            color: row.get(5)?,
            is_pinned: row.get(6)?,
            user_id: row.get(7)?,
            created_at: CreatedAt::Confirmed(row.get::<_, DateTime<Utc>>(8)?),
        })
    }
}

/// The document-collection variant, backed by SQLite. Ids and creation
/// timestamps are assigned by column defaults, so an insert ack is already
/// authoritative.
#[derive(Clone)]
pub struct SqliteNoteStore {
    db: DB,
}

impl SqliteNoteStore {
    pub fn new(db: DB) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NoteStore for SqliteNoteStore {
    async fn query(&self, user_id: &UserId) -> Result<Vec<Note>> {
        let user_id = user_id.clone();
        self.db
            .call(move |conn| {
                let notes = conn
                    .prepare(&format!(
                        "SELECT {NOTE_COLUMNS} FROM notes WHERE user_id = ? ORDER BY id DESC"
                    ))?
                    .query_map(params![user_id], |row| Note::try_from(row))?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(notes)
            })
            .await
            .map_err(|e| StoreError::read(db::Error::from(e)))
    }

    async fn insert(&self, record: &NewNote) -> Result<InsertAck> {
        let record = record.clone();
        self.db
            .call(move |conn| {
                let ack = conn.query_row(
                    r#"INSERT INTO notes (title, content, attachment, category, color, is_pinned, user_id)
                    VALUES (?, ?, ?, ?, ?, ?, ?)
                    RETURNING id, created_at"#,
                    params![
                        record.title,
                        record.content,
                        record.attachment,
                        record.category.as_str(),
                        record.color,
                        record.is_pinned,
                        record.user_id,
                    ],
                    |row| {
                        Ok(InsertAck {
                            id: row.get(0)?,
                            created_at: Some(row.get::<_, DateTime<Utc>>(1)?),
                        })
                    },
                )?;
                Ok(ack)
            })
            .await
            .map_err(|e| StoreError::write(db::Error::from(e)))
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let affected = self
            .db
            .call(move |conn| Ok(conn.execute("DELETE FROM notes WHERE id = ?", params![id])?))
            .await
            .map_err(|e| StoreError::delete(db::Error::from(e)))?;

        if affected == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn set_pinned(&self, id: Uuid, pinned: bool) -> Result<()> {
        let affected = self
            .db
            .call(move |conn| {
                Ok(conn.execute(
                    "UPDATE notes SET is_pinned = ? WHERE id = ?",
                    params![pinned, id],
                )?)
            })
            .await
            .map_err(|e| StoreError::write(db::Error::from(e)))?;

        if affected == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_test_db;
    use crate::notes::model::NoteDraft;

    fn record(title: &str, user: &str) -> NewNote {
        NoteDraft {
            title: title.into(),
            ..Default::default()
        }
        .into_record(user.into())
        .unwrap()
    }

    #[tokio::test]
    async fn insert_acks_with_authoritative_timestamp() {
        let store = SqliteNoteStore::new(init_test_db().await.unwrap());

        let ack = store.insert(&record("first", "user-1")).await.unwrap();
        assert!(ack.created_at.is_some());

        let notes = store.query(&"user-1".into()).await.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, ack.id);
        assert!(notes[0].created_at.is_confirmed());
    }

    #[tokio::test]
    async fn query_is_scoped_to_owner_and_newest_first() {
        let db = init_test_db().await.unwrap();
        db.call(|conn| {
            conn.execute_batch(
                r#"
                INSERT INTO notes (id, title, color, user_id) VALUES (uuid_blob('018f6138-5b4f-722d-97c5-29b927cedbd4'), 'first', '#fff8e1', 'user-1');
                INSERT INTO notes (id, title, color, user_id) VALUES (uuid_blob('018f6146-32f4-7f98-90b8-19fda2c87491'), 'second', '#f3e5f5', 'user-1');
                INSERT INTO notes (id, title, color, user_id) VALUES (uuid_blob('018f6146-32f4-7948-8289-cfb5cdb2b2af'), 'other', '#e1f5fe', 'user-2');
                "#,
            )
            .unwrap();
            Ok(())
        })
        .await
        .unwrap();
        let store = SqliteNoteStore::new(db);

        let notes = store.query(&"user-1".into()).await.unwrap();
        let titles: Vec<_> = notes.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, ["second", "first"]);
    }

    #[tokio::test]
    async fn delete_removes_and_reports_missing() {
        let store = SqliteNoteStore::new(init_test_db().await.unwrap());

        let ack = store.insert(&record("first", "user-1")).await.unwrap();
        store.delete(ack.id).await.unwrap();

        assert!(store.query(&"user-1".into()).await.unwrap().is_empty());
        assert!(matches!(
            store.delete(ack.id).await,
            Err(StoreError::NotFound)
        ));
    }

    #[tokio::test]
    async fn set_pinned_round_trips() {
        let store = SqliteNoteStore::new(init_test_db().await.unwrap());

        let ack = store.insert(&record("first", "user-1")).await.unwrap();
        store.set_pinned(ack.id, true).await.unwrap();

        let notes = store.query(&"user-1".into()).await.unwrap();
        assert!(notes[0].is_pinned);

        assert!(matches!(
            store.set_pinned(Uuid::now_v7(), true).await,
            Err(StoreError::NotFound)
        ));
    }
}
