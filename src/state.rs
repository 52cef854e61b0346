use std::sync::Arc;

use axum_macros::FromRef;

use crate::notes::store::NoteStore;

#[derive(FromRef, Clone)]
pub struct AppState {
    pub store: Arc<dyn NoteStore>,
}
