use std::sync::Arc;

use uuid::Uuid;

use crate::session::Session;

use super::model::{Note, NoteDraft};
use super::store::NoteStore;

/// The in-memory ordered note list for one signed-in session.
///
/// Mutations write through to the store and only then touch the list, so what
/// is displayed never runs ahead of what the store has acknowledged. Store
/// failures are logged and swallowed; there is no retry.
pub struct NoteList {
    store: Arc<dyn NoteStore>,
    session: Session,
    notes: Vec<Note>,
}

impl NoteList {
    pub fn new(store: Arc<dyn NoteStore>, session: Session) -> Self {
        Self {
            store,
            session,
            notes: Vec::new(),
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Replaces the list with the store's notes for the session owner. A
    /// failed read leaves the list empty.
    pub async fn load(&mut self) {
        match self.store.query(&self.session.user_id).await {
            Ok(notes) => self.notes = notes,
            Err(error) => {
                tracing::error!(%error, "loading notes failed");
                self.notes.clear();
            }
        }
    }

    /// Persists a draft and prepends the stored note. An empty draft is a
    /// no-op and issues no store write; so is a failed write.
    pub async fn create(&mut self, draft: NoteDraft) -> Option<&Note> {
        let record = draft.into_record(self.session.user_id.clone())?;
        match self.store.insert(&record).await {
            Ok(ack) => {
                self.notes.insert(0, Note::from_insert(record, ack));
                self.notes.first()
            }
            Err(error) => {
                tracing::error!(%error, "creating note failed");
                None
            }
        }
    }

    /// Deletes from the store first; the local entry stays until the store
    /// acknowledges.
    pub async fn delete(&mut self, id: Uuid) {
        if let Err(error) = self.store.delete(id).await {
            tracing::error!(%error, %id, "deleting note failed");
            return;
        }
        self.notes.retain(|note| note.id != id);
    }

    /// Writes the flipped pin flag through, then updates the local copy.
    /// Unknown ids are ignored.
    pub async fn toggle_pin(&mut self, id: Uuid) {
        let Some(index) = self.notes.iter().position(|note| note.id == id) else {
            return;
        };
        let pinned = !self.notes[index].is_pinned;
        if let Err(error) = self.store.set_pinned(id, pinned).await {
            tracing::error!(%error, %id, "updating pin failed");
            return;
        }
        self.notes[index].is_pinned = pinned;
    }

    /// Moves the note at `source` to `dest`. Local state only: the new order
    /// is never written back, so the next load reverts to store order.
    pub fn reorder(&mut self, source: usize, dest: usize) {
        if source >= self.notes.len() {
            return;
        }
        let note = self.notes.remove(source);
        let dest = dest.min(self.notes.len());
        self.notes.insert(dest, note);
    }

    /// The signed-out signal: drops the list, touches nothing in the store.
    pub fn clear(&mut self) {
        self.notes.clear();
    }
}
