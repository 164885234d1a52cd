//! faqsync DB - SQLite store for parsed FAQ records.

mod database;
mod error;
mod migrations;
mod operations;

pub use database::{Database, MEMORY_URI};
pub use error::{DbError, DbResult};
pub use operations::records::StoredSource;
pub use operations::search::SearchHit;
pub use operations::stats::StoreStats;
