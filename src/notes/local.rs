use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::model::{CreatedAt, InsertAck, NewNote, Note, UserId};
use super::store::{BoxError, NoteStore, Result, StoreError};

/// The whole persisted state, serialized as one JSON document and rewritten
/// on every mutation. The dark-mode flag lives here because it is a device
/// preference, not a note.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Blob {
    #[serde(default)]
    notes: Vec<Note>,
    #[serde(default)]
    dark_mode: bool,
}

/// The browser-local variant of the note store: a single JSON blob on disk,
/// newest note first. It has no clock of its own, so insert acks carry no
/// authoritative timestamp and the client placeholder is what gets stored.
pub struct LocalPersistedStore {
    path: PathBuf,
    blob: Mutex<Blob>,
}

impl LocalPersistedStore {
    /// Loads the blob at `path`, starting empty when the file does not exist
    /// yet.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let blob = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(StoreError::read)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Blob::default(),
            Err(err) => return Err(StoreError::read(err)),
        };
        Ok(Self {
            path,
            blob: Mutex::new(blob),
        })
    }

    pub async fn dark_mode(&self) -> bool {
        self.blob.lock().await.dark_mode
    }

    pub async fn set_dark_mode(&self, enabled: bool) -> Result<()> {
        let mut blob = self.blob.lock().await;
        let previous = blob.dark_mode;
        blob.dark_mode = enabled;
        if let Err(err) = self.persist(&blob).await {
            blob.dark_mode = previous;
            return Err(StoreError::Write(err));
        }
        Ok(())
    }

    async fn persist(&self, blob: &Blob) -> std::result::Result<(), BoxError> {
        let bytes = serde_json::to_vec(blob)?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }
}

#[async_trait]
impl NoteStore for LocalPersistedStore {
    async fn query(&self, user_id: &UserId) -> Result<Vec<Note>> {
        let blob = self.blob.lock().await;
        Ok(blob
            .notes
            .iter()
            .filter(|note| &note.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert(&self, record: &NewNote) -> Result<InsertAck> {
        let mut blob = self.blob.lock().await;
        let id = Uuid::now_v7();
        blob.notes.insert(
            0,
            Note {
                id,
                title: record.title.clone(),
                content: record.content.clone(),
                attachment: record.attachment.clone(),
                category: record.category,
                color: record.color.clone(),
                created_at: CreatedAt::Confirmed(record.created_at),
                is_pinned: record.is_pinned,
                user_id: record.user_id.clone(),
            },
        );
        if let Err(err) = self.persist(&blob).await {
            blob.notes.remove(0);
            return Err(StoreError::Write(err));
        }
        Ok(InsertAck {
            id,
            created_at: None,
        })
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut blob = self.blob.lock().await;
        let index = blob
            .notes
            .iter()
            .position(|note| note.id == id)
            .ok_or(StoreError::NotFound)?;
        let removed = blob.notes.remove(index);
        if let Err(err) = self.persist(&blob).await {
            blob.notes.insert(index, removed);
            return Err(StoreError::Delete(err));
        }
        Ok(())
    }

    async fn set_pinned(&self, id: Uuid, pinned: bool) -> Result<()> {
        let mut blob = self.blob.lock().await;
        let index = blob
            .notes
            .iter()
            .position(|note| note.id == id)
            .ok_or(StoreError::NotFound)?;
        let previous = blob.notes[index].is_pinned;
        blob.notes[index].is_pinned = pinned;
        if let Err(err) = self.persist(&blob).await {
            blob.notes[index].is_pinned = previous;
            return Err(StoreError::Write(err));
        }
        Ok(())
    }
}
