use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, Notify};

use trackindex::bot::{Bot, EVENT_BUFFER};
use trackindex::command::{CommandRegistry, TrackIndexCommand};
use trackindex::config::Config;
use trackindex::console::{self, ConsoleHost, ConsoleInput};
use trackindex::host::InboundEvent;
use trackindex::logging;
use trackindex::store::InMemoryTrackStore;

/// Browse a track index page by page from the console.
#[derive(Debug, Parser)]
#[command(name = "trackindex", version)]
struct Cli {
    /// Config file (default: ~/.config/trackindex/config.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Track seed file; overrides `store.seed_path`.
    #[arg(long)]
    seed: Option<PathBuf>,

    /// Log filter; overrides `logging.level`.
    #[arg(long)]
    log_level: Option<String>,

    /// User id attached to console events.
    #[arg(long, default_value_t = 1)]
    user_id: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("failed to load configuration")?;

    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    logging::init_tracing(&level);

    let store = match cli.seed.as_ref().or(config.store.seed_path.as_ref()) {
        Some(path) => InMemoryTrackStore::from_seed_file(path)
            .with_context(|| format!("failed to load tracks from {}", path.display()))?,
        None => {
            tracing::warn!("No seed file configured, the track store is empty");
            InMemoryTrackStore::new()
        }
    };

    let mut registry = CommandRegistry::new();
    registry.register(Arc::new(TrackIndexCommand::from_config(&config, store)))?;

    let help = format!("{}\n\n{}", registry.help(), console::HELP);
    let host = Arc::new(ConsoleHost::new(std::io::stdout()));
    let bot = Bot::new(registry, Arc::clone(&host));

    let (sender, receiver) = mpsc::channel(EVENT_BUFFER);
    let shutdown = Arc::new(Notify::new());
    let event_loop = tokio::spawn({
        let shutdown = Arc::clone(&shutdown);
        bot.run(receiver, async move { shutdown.notified().await })
    });

    println!("{}", help);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line.context("failed to read stdin")?,
            _ = tokio::signal::ctrl_c() => {
                shutdown.notify_one();
                break;
            }
        };
        let Some(line) = line else { break };

        let event = match console::parse_line(&line, cli.user_id) {
            Ok(ConsoleInput::Invoke(invocation)) => InboundEvent::Command(invocation),
            Ok(ConsoleInput::Click(button)) => match host.click(button, cli.user_id) {
                Ok(event) => event,
                Err(message) => {
                    eprintln!("{}", message);
                    continue;
                }
            },
            Ok(ConsoleInput::Help) => {
                println!("{}", help);
                continue;
            }
            Ok(ConsoleInput::Quit) => break,
            Ok(ConsoleInput::Empty) => continue,
            Err(message) => {
                eprintln!("{}", message);
                continue;
            }
        };

        if sender.send(event).await.is_err() {
            break;
        }
    }

    drop(sender);
    event_loop.await.context("event loop panicked")?;
    Ok(())
}
