//! Scorn engine binary.
//!
//! Wires configuration, logging, the session actor and the background pulse
//! driver together, and exposes the world tooling as subcommands.
//!
//! # Subcommands
//!
//! - `play` (default) -- interactive session reading commands from stdin.
//! - `dump` -- print the generated world as pretty JSON.
//! - `digest` -- print the world's stable 64-bit digest.
//! - `replay --trace "rest,search,use:water"` -- replay a recorded trace and
//!   print the final view.
//!
//! # Startup Sequence
//!
//! 1. Parse the command line
//! 2. Load configuration from `scorn-config.yaml` (defaults if absent)
//! 3. Initialize structured logging (tracing)
//! 4. Run the selected subcommand

mod driver;
mod error;
mod session;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use scorn_agents::Game;
use scorn_core::config::{GameConfig, LoggingConfig};
use scorn_types::Command;
use scorn_world::WorldGenerator;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Configuration file looked up when `--config` is not given.
const DEFAULT_CONFIG_PATH: &str = "scorn-config.yaml";

/// Seeded survival in a decaying settlement world
#[derive(Parser)]
#[command(name = "scorn-engine")]
#[command(about = "Seeded survival in a decaying settlement world", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Override the configured world seed
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand)]
enum Mode {
    /// Play interactively, one command per line
    Play,

    /// Print the generated world as JSON
    Dump,

    /// Print the world's determinism digest
    Digest,

    /// Replay a recorded command trace and print the final view
    Replay {
        /// Comma- or space-separated commands, e.g. "rest,search,use:water"
        #[arg(long, default_value = "")]
        trace: String,

        /// Print the view as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(&cli.config)?;
    if let Some(seed) = cli.seed {
        config.world.seed = seed;
    }

    init_tracing(&config.logging);
    info!(
        path = %cli.config.display(),
        world_name = %config.world.name,
        seed = config.world.seed,
        tick_interval_ms = config.world.tick_interval_ms,
        driver_enabled = config.driver.enabled,
        "Configuration loaded"
    );

    match cli.mode.unwrap_or(Mode::Play) {
        Mode::Play => play(&config).await?,
        Mode::Dump => dump(config.world.seed)?,
        Mode::Digest => digest(config.world.seed)?,
        Mode::Replay { trace, json } => replay(config.world.seed, &trace, json)?,
    }

    Ok(())
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
/// Logs go to stderr so stdout carries only game output.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Load configuration from `path`, or defaults (plus environment overrides)
/// when the file does not exist.
fn load_config(path: &Path) -> Result<GameConfig, EngineError> {
    if path.exists() {
        Ok(GameConfig::from_file(path)?)
    } else {
        let mut config = GameConfig::default();
        config.apply_env_overrides()?;
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Subcommands
// ---------------------------------------------------------------------------

async fn play(config: &GameConfig) -> Result<(), EngineError> {
    let (session, session_task) = session::spawn_session(Game::new(config.world.seed));
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let driver_task = config.driver.enabled.then(|| {
        driver::spawn_driver(session.clone(), config.world.tick_interval_ms, shutdown_rx)
    });

    println!("{}", session.view().await?.render());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        match input {
            "" => {}
            "quit" | "exit" => break,
            "look" => println!("{}", session.view().await?.render()),
            "items" => println!("{}", session.view().await?.render_items()),
            _ => match input.parse::<Command>() {
                Ok(command) => println!("{}", session.apply(command).await?.render()),
                Err(err) => println!("{err}"),
            },
        }
    }

    if shutdown_tx.send(true).is_err() {
        debug!("Background driver not running");
    }
    if let Some(task) = driver_task {
        task.await?;
    }
    drop(session);

    let summary = session_task.await?;
    info!(
        commands = summary.trace.len(),
        dead = summary.game.is_dead(),
        passage = summary.game.player().clock.passage(),
        trace = %summary.trace_text(),
        "Session ended"
    );
    Ok(())
}

fn dump(seed: u64) -> Result<(), EngineError> {
    let world = WorldGenerator::new(seed).generate();
    world.validate()?;
    println!("{}", serde_json::to_string_pretty(&world)?);
    Ok(())
}

fn digest(seed: u64) -> Result<(), EngineError> {
    let world = WorldGenerator::new(seed).generate();
    world.validate()?;
    info!(seed, locations = world.location_count(), "World generated");
    println!("{:016x}", world.digest());
    Ok(())
}

fn replay(seed: u64, trace: &str, json: bool) -> Result<(), EngineError> {
    let commands = Command::parse_trace(trace)?;
    let game = Game::replay(seed, &commands);
    info!(
        seed,
        commands = commands.len(),
        dead = game.is_dead(),
        "Replay finished"
    );
    let view = game.view();
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("{}", view.render());
    }
    Ok(())
}
