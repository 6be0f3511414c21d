//! Record database, derived indexes, and search

mod database;
pub mod search;

pub use database::{
    Database, IndexError, IndexResult, Indexes, NoteRecord, RebuildResult, TagCount,
};
pub use search::{Criterion, find, parse_criteria};
