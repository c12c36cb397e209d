//! App core for linkshelf.
//!
//! [`App`] builds the concrete collaborators once; [`AppContext`] is the
//! handle threaded into each view so nothing reaches for a global client.

use std::rc::Rc;

use tracing::info;

use crate::database::Database;
use crate::services::change_feed::{ChangeFeed, FeedHub};
use crate::services::identity::{IdentityProvider, LocalIdentity};
use crate::services::row_store::{RowStore, SqliteRowStore};
use crate::types::settings::AppSettings;

/// Collaborators a view needs, passed explicitly at construction.
#[derive(Clone)]
pub struct AppContext {
    pub store: Rc<dyn RowStore>,
    pub feed: Rc<dyn ChangeFeed>,
    pub identity: Rc<dyn IdentityProvider>,
    pub settings: AppSettings,
}

impl AppContext {
    /// Same backend, different signed-in session.
    pub fn with_identity(&self, identity: Rc<dyn IdentityProvider>) -> Self {
        Self {
            identity,
            ..self.clone()
        }
    }
}

/// Owns the process-wide backend: SQLite row store, feed hub, and the
/// default session's identity.
pub struct App {
    pub settings: AppSettings,
    pub hub: FeedHub,
    pub store: Rc<SqliteRowStore>,
    pub identity: Rc<LocalIdentity>,
}

impl App {
    /// Opens the database at `settings.database_path`.
    pub fn new(settings: AppSettings) -> Result<Self, Box<dyn std::error::Error>> {
        let db = Database::open(&settings.database_path)
            .map_err(|e| format!("failed to open {}: {}", settings.database_path, e))?;
        info!(path = %settings.database_path, "row store opened");
        Ok(Self::with_database(db, settings))
    }

    /// Uses an in-memory database; data is lost on drop.
    pub fn in_memory(settings: AppSettings) -> Result<Self, Box<dyn std::error::Error>> {
        let db = Database::open_in_memory()?;
        Ok(Self::with_database(db, settings))
    }

    fn with_database(db: Database, settings: AppSettings) -> Self {
        let hub = FeedHub::new(settings.feed_capacity);
        let store = Rc::new(SqliteRowStore::new(db).with_feed(hub.clone()));
        Self {
            settings,
            hub,
            store,
            identity: Rc::new(LocalIdentity::new()),
        }
    }

    /// Context for the default session.
    pub fn context(&self) -> AppContext {
        AppContext {
            store: self.store.clone(),
            feed: Rc::new(self.hub.clone()),
            identity: self.identity.clone(),
            settings: self.settings.clone(),
        }
    }
}
