//! Presentation models for the bookmark list.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::bookmark::Bookmark;

pub const EMPTY_TITLE: &str = "No bookmarks yet";
pub const EMPTY_HINT: &str = "Add your first bookmark to get started!";

/// One rendered bookmark card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookmarkCard {
    pub id: String,
    pub title: String,
    pub url: String,
    pub added_label: String,
    /// Delete request in flight; the delete button shows a spinner.
    pub deleting: bool,
}

impl BookmarkCard {
    pub fn from_bookmark(bookmark: &Bookmark, deleting: bool) -> Self {
        Self {
            id: bookmark.id.clone(),
            title: bookmark.title.clone(),
            url: bookmark.url.clone(),
            added_label: format!("Added {}", format_added_date(&bookmark.created_at)),
            deleting,
        }
    }
}

/// What the list area shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ListView {
    Empty { title: String, hint: String },
    Cards { heading: String, cards: Vec<BookmarkCard> },
}

/// "Mar 5, 2026"
pub fn format_added_date(created_at: &DateTime<Utc>) -> String {
    created_at.format("%b %-d, %Y").to_string()
}

/// "1 Bookmark", "3 Bookmarks"
pub fn list_heading(count: usize) -> String {
    if count == 1 {
        "1 Bookmark".to_string()
    } else {
        format!("{} Bookmarks", count)
    }
}

pub fn render_list(bookmarks: &[Bookmark], deleting: &HashSet<String>) -> ListView {
    if bookmarks.is_empty() {
        return ListView::Empty {
            title: EMPTY_TITLE.to_string(),
            hint: EMPTY_HINT.to_string(),
        };
    }
    ListView::Cards {
        heading: list_heading(bookmarks.len()),
        cards: bookmarks
            .iter()
            .map(|b| BookmarkCard::from_bookmark(b, deleting.contains(&b.id)))
            .collect(),
    }
}
