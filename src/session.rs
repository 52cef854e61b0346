//! Session context.
//!
//! Identity is delegated to an external provider that hands the application
//! an opaque user id on sign-in. That id travels in an explicit `Session`
//! value given to each `NoteList` at construction; there is no process-wide
//! signed-in-user state. Sign-out means dropping the controller (or calling
//! `NoteList::clear`) and building a new `Session` on the next sign-in.

use crate::notes::UserId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: UserId,
}

impl Session {
    pub fn new(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}
