//! Conversational reminder intake pipeline for Nudge.
//!
//! Turns free-text event definitions (`打掃 20250901 13:30`) into persisted
//! reminder rows through a two-turn dialogue: the first turn names the event
//! and normalizes its date/time expression, the second turn captures the
//! recurrence frequency (or cancels). Transport, messaging client, and the
//! spreadsheet service behind the reminder store are external collaborators
//! consumed through the ports in [`intake_ports`].

pub mod intake_frequency;
pub mod intake_normalizer;
pub mod intake_ports;
pub mod intake_replies;
pub mod intake_runtime;
pub mod intake_state;

pub use intake_frequency::{extract_frequency, Frequency, FrequencyOutcome, FrequencyUnit};
pub use intake_normalizer::normalize;
pub use intake_ports::{ReminderRow, ReminderStore, ReplySink};
pub use intake_runtime::IntakeRuntime;
pub use intake_state::{ConversationStateStore, IntakeStage, PendingEvent};
