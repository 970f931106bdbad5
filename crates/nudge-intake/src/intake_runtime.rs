//! Intake state machine and entry points.
//!
//! One logical turn per inbound message: look up the caller's conversation
//! slot, branch on whether an event is pending, and reply. Persistence and
//! outbound replies are fire-and-forget calls through the collaborator
//! ports; their failures are caught and logged so a turn never crashes on
//! external I/O.

use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;
use tracing::{debug, warn};

use nudge_core::local_reference_date;

use crate::intake_frequency::{extract_frequency, FrequencyOutcome};
use crate::intake_normalizer::normalize;
use crate::intake_ports::{ReminderStore, ReplySink};
use crate::intake_replies as replies;
use crate::intake_state::{ConversationStateStore, IntakeStage, PendingEvent};

/// Per-process intake runtime.
///
/// Owns the conversation state store; the reminder store and reply sink are
/// injected. Turns for the same user serialize on that user's conversation
/// slot; turns for different users proceed concurrently.
pub struct IntakeRuntime {
    state: ConversationStateStore,
    store: Arc<dyn ReminderStore>,
    sink: Arc<dyn ReplySink>,
    fixed_reference_date: Option<NaiveDate>,
}

impl IntakeRuntime {
    pub fn new(store: Arc<dyn ReminderStore>, sink: Arc<dyn ReplySink>) -> Self {
        Self {
            state: ConversationStateStore::new(),
            store,
            sink,
            fixed_reference_date: None,
        }
    }

    /// Pins the reference date used to resolve time-only inputs. Without
    /// this the current local date is used.
    pub fn with_reference_date(mut self, reference: NaiveDate) -> Self {
        self.fixed_reference_date = Some(reference);
        self
    }

    pub fn state(&self) -> &ConversationStateStore {
        &self.state
    }

    fn reference_date(&self) -> NaiveDate {
        self.fixed_reference_date
            .unwrap_or_else(local_reference_date)
    }

    /// Handles one inbound message and returns the reply text.
    ///
    /// The reply is also forwarded through the reply sink; a sink failure is
    /// logged and otherwise ignored.
    pub fn handle_turn(&self, user_id: &str, raw_text: &str) -> Result<String> {
        let slot = self.state.slot(user_id);
        let mut pending = slot.lock().expect("conversation slot lock poisoned");
        let reply = match pending.take() {
            None => {
                let (reply, created) = self.new_event_turn(user_id, raw_text);
                *pending = created;
                reply
            }
            Some(event) => {
                let (reply, retained) = self.frequency_turn(event, raw_text);
                *pending = retained;
                reply
            }
        };
        drop(pending);

        self.forward_reply(user_id, &reply);
        Ok(reply)
    }

    /// Idempotent first-time setup: creates the caller's worksheet, or
    /// reports that it already exists.
    pub fn handle_setup(&self, user_id: &str) -> Result<String> {
        let reply = match self.try_setup(user_id) {
            Ok(true) => replies::setup_created_reply().to_string(),
            Ok(false) => replies::setup_exists_reply().to_string(),
            Err(error) => {
                warn!(user_id, error = %error, "worksheet setup failed");
                replies::store_failure_reply().to_string()
            }
        };
        self.forward_reply(user_id, &reply);
        Ok(reply)
    }

    /// Renders every stored reminder for the caller.
    pub fn handle_list_all(&self, user_id: &str) -> Result<String> {
        let reply = match self.store.list_rows(user_id) {
            Ok(rows) if rows.is_empty() => replies::empty_list_reply().to_string(),
            Ok(rows) => replies::render_reminder_list(&rows),
            Err(error) => {
                warn!(user_id, error = %error, "reminder list failed");
                replies::store_failure_reply().to_string()
            }
        };
        self.forward_reply(user_id, &reply);
        Ok(reply)
    }

    /// Idle-state turn: help, or `<name> <date-expr>`.
    ///
    /// Returns the reply and the pending event to install (`Some` only when
    /// the name and date expression both parse).
    fn new_event_turn(&self, user_id: &str, raw_text: &str) -> (String, Option<PendingEvent>) {
        let trimmed = raw_text.trim();
        if replies::HELP_KEYWORDS
            .iter()
            .any(|keyword| trimmed.eq_ignore_ascii_case(keyword))
        {
            return (replies::help_text().to_string(), None);
        }

        let Some((event_name, date_expression)) = split_event_definition(trimmed) else {
            return (replies::format_error_reply().to_string(), None);
        };
        let Some(trigger_at) = normalize(date_expression, self.reference_date()) else {
            return (replies::format_error_reply().to_string(), None);
        };

        debug!(user_id, event_name, trigger_at = %trigger_at, "pending event created");
        let prompt = replies::frequency_prompt(event_name, trigger_at.as_str());
        let pending = PendingEvent {
            user_id: user_id.to_string(),
            event_name: event_name.to_string(),
            trigger_at,
            stage: IntakeStage::AwaitingFrequency,
        };
        (prompt, Some(pending))
    }

    /// Awaiting-frequency turn: cancel, retry on an invalid magnitude, or
    /// complete into a stored reminder.
    ///
    /// Returns the reply and the pending event to retain (`Some` only on an
    /// invalid magnitude, which retries in place). The state entry is gone
    /// after a completion attempt whether or not the write succeeded; a
    /// failed write is logged, surfaced as a generic failure, and never
    /// retried here.
    fn frequency_turn(&self, event: PendingEvent, raw_text: &str) -> (String, Option<PendingEvent>) {
        let trimmed = raw_text.trim();
        if replies::CANCEL_KEYWORDS
            .iter()
            .any(|keyword| trimmed.contains(keyword))
        {
            debug!(user_id = %event.user_id, "pending event cancelled");
            return (replies::cancel_reply().to_string(), None);
        }

        let frequency = match extract_frequency(trimmed) {
            FrequencyOutcome::Parsed(frequency) => frequency,
            FrequencyOutcome::InvalidMagnitude => {
                return (replies::invalid_magnitude_reply().to_string(), Some(event));
            }
        };

        let frequency_text = frequency.storage_text();
        let written = self.store.append_row(
            &event.user_id,
            &event.event_name,
            event.trigger_at.as_str(),
            &frequency_text,
        );
        let reply = match written {
            Ok(()) => replies::confirmation_reply(
                &event.event_name,
                event.trigger_at.as_str(),
                &frequency_text,
            ),
            Err(error) => {
                warn!(user_id = %event.user_id, error = %error, "reminder append failed");
                replies::store_failure_reply().to_string()
            }
        };
        (reply, None)
    }

    fn try_setup(&self, user_id: &str) -> Result<bool> {
        if self.store.worksheet_exists(user_id)? {
            return Ok(false);
        }
        self.store.create_worksheet(user_id)?;
        Ok(true)
    }

    fn forward_reply(&self, user_id: &str, text: &str) {
        if let Err(error) = self.sink.send(user_id, text) {
            warn!(user_id, error = %error, "reply sink send failed");
        }
    }
}

/// Splits an idle-state message into the event name and the date/time
/// expression on the first whitespace run. Both halves must be non-empty;
/// the expression is handed whole to the normalizer, which does its own
/// two-token split.
fn split_event_definition(text: &str) -> Option<(&str, &str)> {
    let (event_name, rest) = text.split_once(char::is_whitespace)?;
    let date_expression = rest.trim_start();
    if event_name.is_empty() || date_expression.is_empty() {
        return None;
    }
    Some((event_name, date_expression))
}
