//! SQLite-backed reminder store.

use std::fs;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use nudge_intake::{ReminderRow, ReminderStore};

/// Durable reminder store keyed by user identity.
///
/// `worksheets` mirrors the per-user tab registration of the spreadsheet
/// service this stands in for; `reminders` holds one row per stored
/// reminder, listed back in insertion order.
#[derive(Debug)]
pub struct SqliteReminderStore {
    connection: Mutex<Connection>,
}

impl SqliteReminderStore {
    /// Opens (creating if needed) the store at `path`, with WAL pragmas and
    /// a busy timeout, and ensures the schema exists.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create reminder store root {}", parent.display())
                })?;
            }
        }
        let connection = Connection::open(path)
            .with_context(|| format!("failed to open reminder store {}", path.display()))?;
        connection.busy_timeout(std::time::Duration::from_secs(5))?;
        connection.execute_batch(
            r#"
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            "#,
        )?;
        initialize_schema(&connection)?;
        debug!(path = %path.display(), "reminder store opened");
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }
}

fn initialize_schema(connection: &Connection) -> Result<()> {
    connection.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS worksheets (
            user_id TEXT PRIMARY KEY
        );
        CREATE TABLE IF NOT EXISTS reminders (
            row_id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            event_name TEXT NOT NULL,
            trigger_at TEXT NOT NULL,
            frequency_text TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_reminders_user
            ON reminders(user_id, row_id);
        "#,
    )?;
    Ok(())
}

impl ReminderStore for SqliteReminderStore {
    fn append_row(
        &self,
        user_id: &str,
        event_name: &str,
        trigger_at: &str,
        frequency_text: &str,
    ) -> Result<()> {
        let connection = self.connection.lock().expect("reminder store lock poisoned");
        connection
            .execute(
                r#"
                INSERT INTO reminders (user_id, event_name, trigger_at, frequency_text)
                VALUES (?1, ?2, ?3, ?4)
                "#,
                params![user_id, event_name, trigger_at, frequency_text],
            )
            .context("failed to append reminder row")?;
        Ok(())
    }

    fn worksheet_exists(&self, user_id: &str) -> Result<bool> {
        let connection = self.connection.lock().expect("reminder store lock poisoned");
        let found = connection
            .query_row(
                "SELECT 1 FROM worksheets WHERE user_id = ?1",
                params![user_id],
                |_row| Ok(()),
            )
            .optional()
            .context("failed to probe worksheet")?;
        Ok(found.is_some())
    }

    fn create_worksheet(&self, user_id: &str) -> Result<()> {
        let connection = self.connection.lock().expect("reminder store lock poisoned");
        connection
            .execute(
                "INSERT OR IGNORE INTO worksheets (user_id) VALUES (?1)",
                params![user_id],
            )
            .context("failed to create worksheet")?;
        Ok(())
    }

    fn list_rows(&self, user_id: &str) -> Result<Vec<ReminderRow>> {
        let connection = self.connection.lock().expect("reminder store lock poisoned");
        let mut statement = connection.prepare(
            r#"
            SELECT event_name, trigger_at
            FROM reminders
            WHERE user_id = ?1
            ORDER BY row_id ASC
            "#,
        )?;
        let mut rows = statement.query(params![user_id])?;
        let mut listed = Vec::new();
        while let Some(row) = rows.next()? {
            listed.push(ReminderRow {
                event_name: row.get(0)?,
                trigger_at: row.get(1)?,
            });
        }
        Ok(listed)
    }
}
