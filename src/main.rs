use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use csv::{ReaderBuilder, Trim};
use tokio::sync::mpsc;
use tracing::error;
use tracing_subscriber::EnvFilter;

mod converter;

/// The size of the channel for queued user events.
const CHANNEL_SIZE: usize = 100;

/// Replays recorded user events against the currency converter screen.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// CSV file of events with `event,value` headers.
    input: PathBuf,

    /// Only print the screen state after the last event.
    #[arg(long)]
    final_only: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_path(&args.input)
        .with_context(|| format!("Failed to read CSV file {}", args.input.display()))?;

    let (sender, receiver) = mpsc::channel(CHANNEL_SIZE);
    let rates = converter::RateTable::builtin().context("Invalid embedded exchange rates")?;
    let mut state = converter::State::new(rates, receiver)
        .context("Failed to open the converter screen")?;

    let handle = tokio::spawn(async move {
        state.run().await;
        state
    });

    for record in reader.deserialize() {
        match record {
            Ok(record) => {
                if let Err(err) = sender.send(record).await {
                    error!("Error sending event: {err}");
                }
            }
            Err(err) => error!("Skipping malformed event row: {err}"),
        }
    }

    drop(sender); // Close the sender to signal no more events will be sent
    let state = handle
        .await
        .context("Failed to join the event handling task")?;

    let mut writer = csv::Writer::from_writer(std::io::stdout());
    if args.final_only {
        writer.serialize(state.get_current())?;
    } else {
        for snapshot in state.get_snapshots() {
            writer.serialize(snapshot)?;
        }
    }
    writer.flush()?;
    Ok(())
}
