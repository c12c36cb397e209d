//! Row store for linkshelf bookmarks.
//!
//! [`RowStore`] is the durable backend contract; [`SqliteRowStore`] implements
//! it over `rusqlite` and publishes each committed write to a [`FeedHub`].

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::params;
use tracing::{debug, error};
use uuid::Uuid;

use crate::database::Database;
use crate::services::change_feed::FeedHub;
use crate::types::bookmark::{Bookmark, NewBookmark};
use crate::types::errors::StoreError;
use crate::types::feed::ChangeEvent;

/// Durable storage for bookmark rows.
#[async_trait(?Send)]
pub trait RowStore {
    /// Bookmarks owned by `user_id`, newest first.
    async fn select_by_owner(&self, user_id: &str) -> Result<Vec<Bookmark>, StoreError>;
    /// Persists a bookmark; the store assigns `id` and `created_at`.
    async fn insert(&self, new: NewBookmark) -> Result<Bookmark, StoreError>;
    /// Deletes the bookmark `id` owned by `user_id`. A missing row, or one
    /// owned by someone else, is `StoreError::NotFound`.
    async fn delete(&self, id: &str, user_id: &str) -> Result<(), StoreError>;
}

/// Row store backed by a SQLite connection.
pub struct SqliteRowStore {
    db: Mutex<Database>,
    feed: Option<FeedHub>,
}

impl SqliteRowStore {
    pub fn new(db: Database) -> Self {
        Self {
            db: Mutex::new(db),
            feed: None,
        }
    }

    /// Publishes every committed insert and delete to `feed`.
    pub fn with_feed(mut self, feed: FeedHub) -> Self {
        self.feed = Some(feed);
        self
    }

    fn lock(&self) -> Result<MutexGuard<'_, Database>, StoreError> {
        self.db
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("database lock poisoned: {}", e)))
    }

    /// Current time truncated to the millisecond precision stored on disk.
    fn now() -> DateTime<Utc> {
        let now = Utc::now();
        DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
    }

    fn row_to_bookmark(row: &rusqlite::Row) -> rusqlite::Result<Bookmark> {
        let millis: i64 = row.get(3)?;
        let created_at = DateTime::from_timestamp_millis(millis)
            .ok_or(rusqlite::Error::IntegralValueOutOfRange(3, millis))?;
        Ok(Bookmark {
            id: row.get(0)?,
            title: row.get(1)?,
            url: row.get(2)?,
            created_at,
            user_id: row.get(4)?,
        })
    }

    fn publish(&self, user_id: &str, event: ChangeEvent) {
        if let Some(feed) = &self.feed {
            feed.publish(user_id, event);
        }
    }
}

#[async_trait(?Send)]
impl RowStore for SqliteRowStore {
    async fn select_by_owner(&self, user_id: &str) -> Result<Vec<Bookmark>, StoreError> {
        // Every store call is a suspension point for the caller.
        tokio::task::yield_now().await;

        let db = self.lock()?;
        let mut stmt = db.connection().prepare(
            "SELECT id, title, url, created_at, user_id FROM bookmarks \
             WHERE user_id = ?1 ORDER BY created_at DESC, rowid DESC",
        )?;
        let rows = stmt.query_map(params![user_id], Self::row_to_bookmark)?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }
        debug!(user_id, count = results.len(), "selected bookmarks");
        Ok(results)
    }

    async fn insert(&self, new: NewBookmark) -> Result<Bookmark, StoreError> {
        tokio::task::yield_now().await;

        let bookmark = Bookmark {
            id: Uuid::new_v4().to_string(),
            title: new.title,
            url: new.url,
            created_at: Self::now(),
            user_id: new.user_id,
        };

        {
            let db = self.lock()?;
            db.connection()
                .execute(
                    "INSERT INTO bookmarks (id, title, url, user_id, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![
                        bookmark.id,
                        bookmark.title,
                        bookmark.url,
                        bookmark.user_id,
                        bookmark.created_at.timestamp_millis()
                    ],
                )
                .map_err(|e| {
                    error!(error = %e, "bookmark insert failed");
                    StoreError::from(e)
                })?;
        }

        self.publish(&bookmark.user_id, ChangeEvent::Insert(bookmark.clone()));
        Ok(bookmark)
    }

    async fn delete(&self, id: &str, user_id: &str) -> Result<(), StoreError> {
        tokio::task::yield_now().await;

        let removed = {
            let db = self.lock()?;
            db.connection().execute(
                "DELETE FROM bookmarks WHERE id = ?1 AND user_id = ?2",
                params![id, user_id],
            )?
        };
        if removed == 0 {
            debug!(id, user_id, "no owned bookmark to delete");
            return Err(StoreError::NotFound(id.to_string()));
        }

        self.publish(user_id, ChangeEvent::Delete { id: id.to_string() });
        Ok(())
    }
}
