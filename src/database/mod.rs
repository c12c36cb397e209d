//! linkshelf database layer.
//!
//! Provides the SQLite connection backing the row store, plus schema migrations.
//!
//! # Usage
//!
//! ```no_run
//! use linkshelf::database::Database;
//!
//! let db = Database::open("linkshelf.db").expect("failed to open database");
//!
//! // Or an in-memory database for tests
//! let db = Database::open_in_memory().expect("failed to open in-memory database");
//! let conn = db.connection();
//! ```

pub mod connection;
pub mod migrations;

pub use connection::Database;
