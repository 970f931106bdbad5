//! Reminder store implementations for Nudge.
//!
//! Provides the SQLite-backed store used by the CLI (one logical worksheet
//! per user, mirroring the spreadsheet service it stands in for) and an
//! in-memory store for tests and ephemeral runs.

pub mod store_memory;
pub mod store_sqlite;

pub use store_memory::MemoryReminderStore;
pub use store_sqlite::SqliteReminderStore;
