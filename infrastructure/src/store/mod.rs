//! Question persistence adapters

pub mod sqlite;

pub use sqlite::SqliteQuestionStore;
