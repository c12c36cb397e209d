//! linkshelf: a personal bookmark manager with live updates across sessions.
//!
//! The dashboard keeps an optimistic in-memory list in step with a pushed
//! change feed. The row store, feed and identity service are traits, with
//! in-process implementations over SQLite and a broadcast hub.

pub mod app;
pub mod database;
pub mod logging;
pub mod managers;
pub mod platform;
pub mod services;
pub mod types;
