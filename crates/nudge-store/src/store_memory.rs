//! In-memory reminder store for tests and ephemeral runs.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use anyhow::Result;

use nudge_intake::{ReminderRow, ReminderStore};

#[derive(Debug, Default)]
struct MemoryState {
    worksheets: HashSet<String>,
    rows: HashMap<String, Vec<StoredRow>>,
}

#[derive(Debug, Clone)]
struct StoredRow {
    event_name: String,
    trigger_at: String,
    frequency_text: String,
}

#[derive(Debug, Default)]
/// Process-local reminder store; contents vanish with the process.
pub struct MemoryReminderStore {
    state: Mutex<MemoryState>,
}

impl MemoryReminderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frequency column values for `user_id`, in insertion order.
    pub fn frequencies(&self, user_id: &str) -> Vec<String> {
        let state = self.state.lock().expect("memory store lock poisoned");
        state
            .rows
            .get(user_id)
            .map(|rows| rows.iter().map(|row| row.frequency_text.clone()).collect())
            .unwrap_or_default()
    }
}

impl ReminderStore for MemoryReminderStore {
    fn append_row(
        &self,
        user_id: &str,
        event_name: &str,
        trigger_at: &str,
        frequency_text: &str,
    ) -> Result<()> {
        let mut state = self.state.lock().expect("memory store lock poisoned");
        state
            .rows
            .entry(user_id.to_string())
            .or_default()
            .push(StoredRow {
                event_name: event_name.to_string(),
                trigger_at: trigger_at.to_string(),
                frequency_text: frequency_text.to_string(),
            });
        Ok(())
    }

    fn worksheet_exists(&self, user_id: &str) -> Result<bool> {
        let state = self.state.lock().expect("memory store lock poisoned");
        Ok(state.worksheets.contains(user_id))
    }

    fn create_worksheet(&self, user_id: &str) -> Result<()> {
        let mut state = self.state.lock().expect("memory store lock poisoned");
        state.worksheets.insert(user_id.to_string());
        Ok(())
    }

    fn list_rows(&self, user_id: &str) -> Result<Vec<ReminderRow>> {
        let state = self.state.lock().expect("memory store lock poisoned");
        Ok(state
            .rows
            .get(user_id)
            .map(|rows| {
                rows.iter()
                    .map(|row| ReminderRow {
                        event_name: row.event_name.clone(),
                        trigger_at: row.trigger_at.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use nudge_intake::ReminderStore;

    use super::MemoryReminderStore;

    #[test]
    fn unit_memory_store_isolates_users() {
        let store = MemoryReminderStore::new();
        store
            .append_row("user-1", "打掃", "2025/09/01 13:30:00", "3天")
            .expect("append");

        assert_eq!(store.list_rows("user-1").expect("list").len(), 1);
        assert!(store.list_rows("user-2").expect("list").is_empty());
        assert_eq!(store.frequencies("user-1"), vec!["3天".to_string()]);
    }

    #[test]
    fn unit_memory_store_worksheets_are_idempotent() {
        let store = MemoryReminderStore::new();
        assert!(!store.worksheet_exists("user-1").expect("probe"));
        store.create_worksheet("user-1").expect("create");
        store.create_worksheet("user-1").expect("create again");
        assert!(store.worksheet_exists("user-1").expect("probe"));
    }
}
