//! In-memory bookmark collection for one dashboard session.
//!
//! Local optimistic edits and pushed change events both land here. Every
//! mutation is keyed by bookmark id, so an optimistic admit and the feed
//! insert for the same row can arrive in either order.

use std::collections::HashSet;

use crate::types::bookmark::Bookmark;
use crate::types::feed::ChangeEvent;

/// Ordered bookmark collection, newest first, at most one entry per id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookmarkList {
    entries: Vec<Bookmark>,
}

impl BookmarkList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the list from a row-store snapshot, keeping its order.
    /// Repeated ids keep their first occurrence.
    pub fn from_snapshot(snapshot: Vec<Bookmark>) -> Self {
        let mut seen = HashSet::new();
        let entries = snapshot
            .into_iter()
            .filter(|b| seen.insert(b.id.clone()))
            .collect();
        Self { entries }
    }

    /// Inserts at the head unless an entry with the same id exists.
    /// Returns whether the bookmark was inserted.
    pub fn admit(&mut self, bookmark: Bookmark) -> bool {
        if self.contains(&bookmark.id) {
            return false;
        }
        self.entries.insert(0, bookmark);
        true
    }

    /// Removes the entry with `id`, keeping the others in order.
    pub fn remove(&mut self, id: &str) -> Option<Bookmark> {
        let index = self.position(id)?;
        Some(self.entries.remove(index))
    }

    /// Replaces the entry with the same id in place. No-op if absent.
    pub fn replace(&mut self, bookmark: Bookmark) -> bool {
        match self.position(&bookmark.id) {
            Some(index) => {
                self.entries[index] = bookmark;
                true
            }
            None => false,
        }
    }

    /// Applies a pushed change event. Returns whether the list changed.
    pub fn apply(&mut self, event: &ChangeEvent) -> bool {
        match event {
            ChangeEvent::Insert(bookmark) => self.admit(bookmark.clone()),
            ChangeEvent::Update(bookmark) => self.replace(bookmark.clone()),
            ChangeEvent::Delete { id } => self.remove(id).is_some(),
        }
    }

    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&Bookmark> {
        self.entries.iter().find(|b| b.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|b| b.id == id)
    }
}
