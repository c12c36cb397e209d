// linkshelf services
// Backend collaborators (row store, change feed, identity) and configuration.

pub mod change_feed;
pub mod identity;
pub mod row_store;
pub mod settings_engine;
