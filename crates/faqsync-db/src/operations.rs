//! Read and write operations on the record store.

pub mod records;
pub mod runs;
pub mod search;
pub mod stats;
