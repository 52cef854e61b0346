use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{Error, Result};

use super::model::{CategoryFilter, CreateNote, FindNotesResponse, Note, NoteDraft, UpdateNote, UserId};
use super::store::NoteStore;
use super::view::{derive_view, NoteView};

#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub async fn find_notes(store: &dyn NoteStore, user_id: UserId) -> Result<FindNotesResponse> {
    let results = store.query(&user_id).await?;
    Ok(FindNotesResponse { results })
}

pub async fn create_note(store: &dyn NoteStore, args: CreateNote) -> Result<Note> {
    let CreateNote {
        title,
        content,
        user_id,
        attachment,
        category,
    } = args;
    let draft = NoteDraft {
        title,
        content,
        attachment,
        category: category.map_or(CategoryFilter::All, CategoryFilter::Only),
    };
    let record = draft
        .into_record(user_id)
        .ok_or_else(|| Error::Validation("an empty note is never saved".into()))?;
    let ack = store.insert(&record).await?;
    Ok(Note::from_insert(record, ack))
}

pub async fn delete_note(store: &dyn NoteStore, note_id: Uuid) -> Result<Message> {
    store.delete(note_id).await?;
    Ok(Message::new("Note deleted"))
}

pub async fn update_note(store: &dyn NoteStore, note_id: Uuid, args: UpdateNote) -> Result<Message> {
    store.set_pinned(note_id, args.is_pinned).await?;
    Ok(Message::new("Note updated"))
}

pub async fn note_view(
    store: &dyn NoteStore,
    user_id: UserId,
    search: String,
    category: CategoryFilter,
) -> Result<NoteView> {
    let notes = store.query(&user_id).await?;
    Ok(derive_view(&notes, &search, category))
}
