//! Data models for cosmic-api

pub mod journal;

pub use journal::{JournalEntry, NewJournalEntry};
