use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::model::{CategoryFilter, Note};

/// The two partitions the dashboard renders: pinned notes above the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteView {
    pub pinned: Vec<Note>,
    pub unpinned: Vec<Note>,
}

/// Filters `notes` by a case-insensitive substring search over title and
/// content (an empty search matches everything) and by the active category,
/// then splits the survivors by pin status. Pure: same inputs, same two
/// sequences, relative order preserved in both.
pub fn derive_view(notes: &[Note], search: &str, category: CategoryFilter) -> NoteView {
    let needle = search.to_lowercase();
    let (pinned, unpinned) = notes
        .iter()
        .filter(|note| {
            (note.title.to_lowercase().contains(&needle)
                || note.content.to_lowercase().contains(&needle))
                && category.matches(note.category)
        })
        .cloned()
        .partition(|note| note.is_pinned);
    NoteView { pinned, unpinned }
}

/// Renders a store timestamp for display, whatever shape it arrived in: an
/// object carrying a `seconds` field, a datetime string, or raw epoch
/// milliseconds. Unparseable input renders as an empty string.
pub fn format_date(value: &Value) -> String {
    parse_timestamp(value)
        .map(|date| date.format("%-m/%-d/%Y").to_string())
        .unwrap_or_default()
}

fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Object(map) => DateTime::from_timestamp(map.get("seconds")?.as_i64()?, 0),
        Value::String(s) => parse_datetime_str(s),
        Value::Number(n) => DateTime::from_timestamp_millis(n.as_i64()?),
        _ => None,
    }
}

fn parse_datetime_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(s) {
        return Some(date.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(date.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|date| date.and_utc())
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use uuid::Uuid;

    use super::*;
    use crate::notes::model::{Category, CreatedAt};

    fn note(title: &str, content: &str, category: Category, pinned: bool) -> Note {
        Note {
            id: Uuid::now_v7(),
            title: title.into(),
            content: content.into(),
            attachment: None,
            category,
            color: "#fff8e1".into(),
            created_at: CreatedAt::Confirmed(Utc::now()),
            is_pinned: pinned,
            user_id: "user-1".into(),
        }
    }

    #[test]
    fn a_note_lands_in_exactly_one_partition() {
        for pinned in [false, true] {
            let notes = vec![note("a", "", Category::Work, pinned)];
            let view = derive_view(&notes, "", CategoryFilter::All);
            assert_eq!(view.pinned.len(), usize::from(pinned));
            assert_eq!(view.unpinned.len(), usize::from(!pinned));
        }
    }

    #[test]
    fn search_matches_title_or_content_case_insensitively() {
        let notes = vec![
            note("Groceries", "milk, eggs", Category::Personal, false),
            note("Standup", "MILK the agenda for updates", Category::Work, false),
            note("Loose ends", "nothing here", Category::Ideas, true),
        ];
        let view = derive_view(&notes, "milk", CategoryFilter::All);
        assert!(view.pinned.is_empty());
        assert_eq!(view.unpinned.len(), 2);
        for found in &view.unpinned {
            let haystack = format!("{} {}", found.title, found.content).to_lowercase();
            assert!(haystack.contains("milk"));
        }
    }

    #[test]
    fn empty_search_matches_everything() {
        let notes = vec![
            note("a", "", Category::Work, false),
            note("b", "", Category::Ideas, true),
        ];
        let view = derive_view(&notes, "", CategoryFilter::All);
        assert_eq!(view.pinned.len() + view.unpinned.len(), notes.len());
    }

    #[test]
    fn category_filter_narrows_and_all_passes() {
        let notes = vec![
            note("a", "", Category::Work, false),
            note("b", "", Category::Personal, false),
        ];

        let work = derive_view(&notes, "", CategoryFilter::Only(Category::Work));
        assert_eq!(work.unpinned.len(), 1);
        assert_eq!(work.unpinned[0].title, "a");

        let all = derive_view(&notes, "", CategoryFilter::All);
        assert_eq!(all.unpinned.len(), 2);
    }

    #[test]
    fn input_order_is_preserved_within_partitions() {
        let notes = vec![
            note("a", "", Category::Work, false),
            note("b", "", Category::Work, true),
            note("c", "", Category::Work, false),
            note("d", "", Category::Work, true),
        ];
        let view = derive_view(&notes, "", CategoryFilter::All);
        let pinned: Vec<_> = view.pinned.iter().map(|n| n.title.as_str()).collect();
        let unpinned: Vec<_> = view.unpinned.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(pinned, ["b", "d"]);
        assert_eq!(unpinned, ["a", "c"]);
    }

    #[test]
    fn format_date_reads_a_seconds_object() {
        assert_eq!(format_date(&json!({ "seconds": 1714953600 })), "5/6/2024");
    }

    #[test]
    fn format_date_reads_datetime_strings() {
        assert_eq!(format_date(&json!("2024-05-06T12:30:00Z")), "5/6/2024");
        assert_eq!(format_date(&json!("2024-05-06 12:30:00")), "5/6/2024");
        assert_eq!(format_date(&json!("2024-05-06")), "5/6/2024");
    }

    #[test]
    fn format_date_reads_epoch_millis() {
        assert_eq!(format_date(&json!(1_714_953_600_000_i64)), "5/6/2024");
    }

    #[test]
    fn format_date_never_fails_on_garbage() {
        assert_eq!(format_date(&json!("not a date")), "");
        assert_eq!(format_date(&json!(null)), "");
        assert_eq!(format_date(&json!({ "nanos": 12 })), "");
        assert_eq!(format_date(&json!(true)), "");
        assert_eq!(format_date(&json!(12.5)), "");
    }
}
