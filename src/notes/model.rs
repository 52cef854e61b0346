use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque owner identifier, handed out by the external identity provider.
pub type UserId = String;

/// One entry is drawn per note at creation time and stored with it, so a
/// note keeps its color across reloads.
pub const PASTEL_COLORS: [&str; 10] = [
    "#fff8e1", "#f3e5f5", "#e1f5fe", "#e8f5e9", "#fff3e0", "#e0f7fa", "#f1f8e9", "#fce4ec",
    "#f9fbe7", "#e8eaf6",
];

pub fn random_color() -> &'static str {
    let mut rng = rand::thread_rng();
    PASTEL_COLORS[rng.gen_range(0..PASTEL_COLORS.len())]
}

#[derive(thiserror::Error, Debug)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(String);

/// Stored note category. "All" is a view filter, never a stored value — see
/// [`CategoryFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Work,
    Personal,
    Ideas,
    Archive,
    Uncategorized,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::Personal => "Personal",
            Self::Ideas => "Ideas",
            Self::Archive => "Archive",
            Self::Uncategorized => "Uncategorized",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Work" => Ok(Self::Work),
            "Personal" => Ok(Self::Personal),
            "Ideas" => Ok(Self::Ideas),
            "Archive" => Ok(Self::Archive),
            "Uncategorized" => Ok(Self::Uncategorized),
            other => Err(UnknownCategory(other.into())),
        }
    }
}

/// The sidebar selection: either a concrete category or "All".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(only) => *only == category,
        }
    }

    /// The category a note saved under this filter is filed as. Saving while
    /// "All" is active files the note as Uncategorized.
    pub fn assigned_category(&self) -> Category {
        match self {
            Self::All => Category::Uncategorized,
            Self::Only(category) => *category,
        }
    }
}

impl std::str::FromStr for CategoryFilter {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "All" {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

/// Creation timestamp as a two-phase value: `Provisional` is the client-side
/// placeholder shown until the store's authoritative value arrives (the next
/// load replaces it). Serializes as the plain datetime; anything read back
/// from a store is `Confirmed`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "DateTime<Utc>", into = "DateTime<Utc>")]
pub enum CreatedAt {
    Provisional(DateTime<Utc>),
    Confirmed(DateTime<Utc>),
}

impl CreatedAt {
    pub fn value(&self) -> DateTime<Utc> {
        match self {
            Self::Provisional(value) | Self::Confirmed(value) => *value,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed(_))
    }
}

impl From<DateTime<Utc>> for CreatedAt {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Confirmed(value)
    }
}

impl From<CreatedAt> for DateTime<Utc> {
    fn from(value: CreatedAt) -> Self {
        value.value()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub attachment: Option<String>,
    pub category: Category,
    pub color: String,
    pub created_at: CreatedAt,
    #[serde(default)]
    pub is_pinned: bool,
    pub user_id: UserId,
}

impl Note {
    /// Assembles the in-memory note from the record that was just written and
    /// the store's ack. Without an authoritative timestamp in the ack the
    /// client placeholder stands in as `Provisional`.
    pub fn from_insert(record: NewNote, ack: InsertAck) -> Self {
        let created_at = match ack.created_at {
            Some(value) => CreatedAt::Confirmed(value),
            None => CreatedAt::Provisional(record.created_at),
        };
        Self {
            id: ack.id,
            title: record.title,
            content: record.content,
            attachment: record.attachment,
            category: record.category,
            color: record.color,
            created_at,
            is_pinned: record.is_pinned,
            user_id: record.user_id,
        }
    }
}

/// Only image payloads make it into the attachment slot; anything else the
/// picker produced is discarded before saving.
pub fn is_image_data_uri(value: &str) -> bool {
    value.starts_with("data:image/") && value.contains(";base64,")
}

/// What the editor form submits. `category` is the filter active at save
/// time.
#[derive(Debug, Clone, Default)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub attachment: Option<String>,
    pub category: CategoryFilter,
}

impl NoteDraft {
    /// True when nothing survives trimming. Such a draft is never persisted.
    pub fn is_empty(&self) -> bool {
        self.title.trim().is_empty() && self.content.trim().is_empty() && self.attachment().is_none()
    }

    fn attachment(&self) -> Option<&str> {
        self.attachment.as_deref().filter(|a| is_image_data_uri(a))
    }

    /// Builds the store record: trimmed text, the active filter resolved to a
    /// stored category, a palette color drawn at random, the owner stamped
    /// in, and a provisional client timestamp. `None` when the draft is
    /// empty.
    pub fn into_record(self, user_id: UserId) -> Option<NewNote> {
        if self.is_empty() {
            return None;
        }
        let attachment = self.attachment().map(str::to_owned);
        Some(NewNote {
            title: self.title.trim().to_owned(),
            content: self.content.trim().to_owned(),
            attachment,
            category: self.category.assigned_category(),
            color: random_color().to_owned(),
            is_pinned: false,
            user_id,
            created_at: Utc::now(),
        })
    }
}

/// A record as handed to `NoteStore::insert`. `created_at` is the client
/// placeholder; a store with its own clock ignores it.
#[derive(Debug, Clone)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub attachment: Option<String>,
    pub category: Category,
    pub color: String,
    pub is_pinned: bool,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// What a store returns for an insert: the assigned id, plus the
/// authoritative creation time when the store resolves it synchronously.
#[derive(Debug, Clone, Copy)]
pub struct InsertAck {
    pub id: Uuid,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNote {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub user_id: UserId,
    #[serde(default)]
    pub attachment: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNote {
    pub is_pinned: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FindNotesResponse {
    pub results: Vec<Note>,
}
