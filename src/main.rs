use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use simplelog::{Config, LevelFilter, WriteLogger};
use snake_board::game::GameConfig;
use snake_board::modes::PlayMode;

#[derive(Parser)]
#[command(name = "snake_board")]
#[command(version, about = "Snake in the terminal")]
struct Cli {
    /// File that receives the game log (the terminal is taken by the board)
    #[arg(long, default_value = "snake_board.log")]
    log_file: PathBuf,

    /// Log verbosity
    #[arg(long, default_value = "info")]
    log_level: LogLevel,

    /// Seed for food placement, for reproducible games
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let level = LevelFilter::from(cli.log_level);
    if level == LevelFilter::Off {
        return Ok(());
    }

    let file = File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {}", cli.log_file.display()))?;
    WriteLogger::init(level, Config::default(), file).context("Failed to initialize logger")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let mut play_mode = PlayMode::new(GameConfig::default(), cli.seed)?;
    play_mode.run().await?;

    Ok(())
}
