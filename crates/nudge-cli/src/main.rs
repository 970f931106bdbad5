//! Nudge command-line interface.
//!
//! Drives the intake runtime locally: one-shot turns, setup, listing, and an
//! interactive chat loop. Replies print to stdout; the reply-sink port is
//! wired to a logging sink since there is no messaging platform here.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use nudge_intake::{IntakeRuntime, ReminderStore, ReplySink};
use nudge_store::{MemoryReminderStore, SqliteReminderStore};

#[derive(Debug, Parser)]
#[command(name = "nudge", about = "Conversational reminder intake")]
struct Cli {
    /// Directory holding the reminder database.
    #[arg(long, env = "NUDGE_DATA_DIR", default_value = ".nudge")]
    data_dir: PathBuf,

    /// Acting user identity.
    #[arg(long, env = "NUDGE_USER", default_value = "local")]
    user: String,

    /// Use an in-memory store instead of the on-disk database.
    #[arg(long)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create the acting user's reminder worksheet.
    Setup,
    /// List stored reminders.
    List,
    /// Process a single intake turn.
    Turn { text: String },
    /// Interactive intake loop; `exit` or EOF quits.
    Chat,
}

fn init_tracing() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

/// Stand-in for the messaging platform's outbound channel: replies are
/// already printed by the command handlers, so the sink only logs.
struct LoggingReplySink;

impl ReplySink for LoggingReplySink {
    fn send(&self, user_id: &str, text: &str) -> Result<()> {
        tracing::debug!(user_id, text, "reply forwarded");
        Ok(())
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let store: Arc<dyn ReminderStore> = if cli.ephemeral {
        Arc::new(MemoryReminderStore::new())
    } else {
        Arc::new(SqliteReminderStore::open(&cli.data_dir.join("reminders.db"))?)
    };
    let runtime = IntakeRuntime::new(store, Arc::new(LoggingReplySink));

    match cli.command {
        Command::Setup => println!("{}", runtime.handle_setup(&cli.user)?),
        Command::List => println!("{}", runtime.handle_list_all(&cli.user)?),
        Command::Turn { text } => println!("{}", runtime.handle_turn(&cli.user, &text)?),
        Command::Chat => run_chat(&runtime, &cli.user)?,
    }
    Ok(())
}

fn run_chat(runtime: &IntakeRuntime, user_id: &str) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed == "exit" {
            break;
        }
        println!("{}", runtime.handle_turn(user_id, trimmed)?);
    }
    Ok(())
}
