use serde::{Deserialize, Serialize};

use super::bookmark::Bookmark;

/// Kind of row-level change carried by a [`ChangeEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// A change notification pushed by the change feed.
///
/// Deletes only carry the key of the removed row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "UPPERCASE")]
pub enum ChangeEvent {
    Insert(Bookmark),
    Update(Bookmark),
    Delete { id: String },
}

impl ChangeEvent {
    pub fn kind(&self) -> ChangeKind {
        match self {
            ChangeEvent::Insert(_) => ChangeKind::Insert,
            ChangeEvent::Update(_) => ChangeKind::Update,
            ChangeEvent::Delete { .. } => ChangeKind::Delete,
        }
    }

    /// Id of the affected row.
    pub fn id(&self) -> &str {
        match self {
            ChangeEvent::Insert(b) | ChangeEvent::Update(b) => &b.id,
            ChangeEvent::Delete { id } => id,
        }
    }
}

/// State of a view's feed subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedStatus {
    /// Events are being applied as they arrive.
    Live,
    /// Delivery failed; the view shows its last known local state.
    Degraded,
    /// The view was torn down and the subscription released.
    Closed,
}
