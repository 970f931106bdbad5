//! Collaborator ports consumed by the intake runtime.
//!
//! The messaging client and the spreadsheet-backed persistence service live
//! outside this crate; the runtime speaks to them only through these traits
//! and never sees their wire formats.

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Outbound reply channel. Failures are logged by the runtime and never
/// retried; a dropped reply must not crash the turn.
pub trait ReplySink: Send + Sync {
    fn send(&self, user_id: &str, text: &str) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One stored reminder row as read back from the reminder store.
pub struct ReminderRow {
    pub event_name: String,
    pub trigger_at: String,
}

/// Durable reminder persistence, one logical worksheet per user.
pub trait ReminderStore: Send + Sync {
    fn append_row(
        &self,
        user_id: &str,
        event_name: &str,
        trigger_at: &str,
        frequency_text: &str,
    ) -> Result<()>;

    fn worksheet_exists(&self, user_id: &str) -> Result<bool>;

    fn create_worksheet(&self, user_id: &str) -> Result<()>;

    fn list_rows(&self, user_id: &str) -> Result<Vec<ReminderRow>>;
}
