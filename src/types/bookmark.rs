use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A saved bookmark as persisted by the row store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: String,
    pub title: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub user_id: String,
}

/// Insert request for a bookmark. The row store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBookmark {
    pub title: String,
    pub url: String,
    pub user_id: String,
}

impl NewBookmark {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            user_id: user_id.into(),
        }
    }
}
