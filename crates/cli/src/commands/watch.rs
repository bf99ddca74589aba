//! Interactive dashboard session.
//!
//! Runs the page event loop with the console as the surface. A reader task
//! turns stdin lines into [`UiEvent`]s:
//!
//! - `show <section>` - switch section
//! - `refresh` - reload the active section
//! - `click <control-id>` - activate a rendered control
//! - `quit` - stop (end of input does the same)

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};

use trendx_dashboard::{ApiClient, Dashboard, DashboardConfig, Section, UiEvent};

use crate::console::{Confirm, ConsoleSurface};

/// Capacity of the stdin event channel.
const EVENT_BUFFER: usize = 16;

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Event(UiEvent),
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
enum CommandError {
    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("missing argument for {0}")]
    MissingArgument(&'static str),

    #[error("{0}")]
    InvalidSection(String),
}

/// Run the dashboard until stdin closes or `quit` is entered.
///
/// Deletion prompts are confirmed automatically since stdin carries the
/// command stream.
///
/// # Errors
///
/// Returns an error if the stdin reader task panicked. Load failures are
/// shown on the console instead.
pub async fn run(
    config: &DashboardConfig,
    section: Section,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut dashboard = Dashboard::new(
        ApiClient::new(config.api_base.clone()),
        ConsoleSurface::stdout(Confirm::Assume(true)),
    );
    dashboard.init().await;
    if section != Section::Dashboard {
        // Failures are already on the console.
        let _ = dashboard.activate(section).await;
    }

    let (tx, rx) = mpsc::channel(EVENT_BUFFER);
    let reader = tokio::spawn(read_commands(tx));

    info!(api_base = %config.api_base, "Watching dashboard");
    dashboard.run(rx, config.poll_interval).await;

    reader.await?;
    Ok(())
}

async fn read_commands(tx: mpsc::Sender<UiEvent>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "Failed to read command");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line) {
            Ok(Command::Event(event)) => {
                if tx.send(event).await.is_err() {
                    break;
                }
            }
            Ok(Command::Quit) => break,
            Err(e) => warn!(error = %e, "Ignoring command"),
        }
    }
}

fn parse_command(line: &str) -> Result<Command, CommandError> {
    let mut words = line.split_whitespace();
    let command = words.next().unwrap_or_default();
    let argument = words.next();

    match command {
        "show" => {
            let section = argument.ok_or(CommandError::MissingArgument("show"))?;
            let section = section
                .parse::<Section>()
                .map_err(CommandError::InvalidSection)?;
            Ok(Command::Event(UiEvent::Navigate(section)))
        }
        "refresh" => Ok(Command::Event(UiEvent::Refresh)),
        "click" => {
            let control = argument.ok_or(CommandError::MissingArgument("click"))?;
            Ok(Command::Event(UiEvent::Click(control.to_string())))
        }
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}
