//! faqsync Core - Domain types shared by the FAQ ingestion crates.

mod error;
mod types;

pub use error::{Error, Result};
pub use types::*;
