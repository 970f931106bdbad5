//! Per-user conversation state for in-flight reminder intake.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use nudge_core::CanonicalTimestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Dialogue stage an in-flight intake is waiting on.
///
/// `AwaitingFrequency` is currently the only non-terminal stage; the enum is
/// kept open for further dialogue turns.
pub enum IntakeStage {
    AwaitingFrequency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// An in-flight intake record for one user.
///
/// Created the instant a new-event turn succeeds and consumed exactly once
/// by the following turn from the same user. Never persisted; it lives only
/// inside the [`ConversationStateStore`].
pub struct PendingEvent {
    pub user_id: String,
    pub event_name: String,
    pub trigger_at: CanonicalTimestamp,
    pub stage: IntakeStage,
}

/// A per-user conversation slot. Holding the inner mutex for a whole turn
/// serializes turns for that user without blocking anyone else.
pub type ConversationSlot = Arc<Mutex<Option<PendingEvent>>>;

#[derive(Debug, Default)]
/// Ephemeral, process-local map from user identity to pending intake state.
///
/// Explicitly owned and injected into the runtime rather than living in a
/// module-level global; an absent entry means "no pending event". The outer
/// mutex guards only the identity map itself, so lookups stay cheap while
/// each user's turn holds its own slot lock across the read-modify-write
/// cycle (including the persistence write between lookup and delete).
pub struct ConversationStateStore {
    slots: Mutex<HashMap<String, ConversationSlot>>,
}

impl ConversationStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the slot for `user_id`, creating an empty one on first use.
    pub fn slot(&self, user_id: &str) -> ConversationSlot {
        let mut slots = self
            .slots
            .lock()
            .expect("conversation state store lock poisoned");
        slots.entry(user_id.to_string()).or_default().clone()
    }

    /// Snapshot of the pending event for `user_id`, if any.
    ///
    /// Inspection hook for tests and diagnostics; turn handling always goes
    /// through [`Self::slot`] and holds the slot lock instead.
    pub fn pending_for(&self, user_id: &str) -> Option<PendingEvent> {
        let slot = {
            let slots = self
                .slots
                .lock()
                .expect("conversation state store lock poisoned");
            slots.get(user_id).cloned()
        };
        slot.and_then(|slot| {
            slot.lock()
                .expect("conversation slot lock poisoned")
                .clone()
        })
    }

    /// Number of users with a pending event, ignoring empty slots.
    ///
    /// Inspection hook, like [`Self::pending_for`].
    pub fn pending_count(&self) -> usize {
        let slots = self
            .slots
            .lock()
            .expect("conversation state store lock poisoned");
        slots
            .values()
            .filter(|slot| {
                slot.lock()
                    .expect("conversation slot lock poisoned")
                    .is_some()
            })
            .count()
    }
}
