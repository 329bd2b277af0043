use anyhow::{Context, Result, anyhow};
use clap::Parser;
use rival_snake::audio::{AudioSink, Silent, TerminalBell};
use rival_snake::game::GameConfig;
use rival_snake::modes::HumanMode;
use rival_snake::persistence::HighScoreStore;
use rival_snake::persistence::high_score::DEFAULT_HIGH_SCORE_FILE;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Parser)]
#[command(name = "rival_snake")]
#[command(version, about = "Snake against an AI rival, with power-ups and obstacles")]
struct Cli {
    /// JSON file with game settings; missing fields use defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Milliseconds between game ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Tile size in pixels (canvas stays 800x600 unless the config says otherwise)
    #[arg(long)]
    tile_size: Option<u32>,

    /// Where the high score is kept
    #[arg(long, default_value = DEFAULT_HIGH_SCORE_FILE)]
    high_score_file: PathBuf,

    /// Seed for a reproducible board
    #[arg(long)]
    seed: Option<u64>,

    /// Disable the terminal bell
    #[arg(long)]
    mute: bool,

    /// Log file; the terminal itself is taken by the game
    #[arg(long, default_value = "rival_snake.log")]
    log_file: PathBuf,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(())
}

fn load_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::from_json_file(path)?,
        None => GameConfig::default(),
    };

    if let Some(tick_ms) = cli.tick_ms {
        config.tick_ms = tick_ms;
    }
    if let Some(tile_size) = cli.tile_size {
        config.tile_size = tile_size;
    }

    config
        .validate()
        .map_err(|msg| anyhow!("Invalid game configuration: {msg}"))?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_file)?;

    let config = load_config(&cli)?;
    tracing::info!(?config, seed = ?cli.seed, "starting");

    let audio: Box<dyn AudioSink> = if cli.mute {
        Box::new(Silent)
    } else {
        // the UI draws on stderr too
        Box::new(TerminalBell::new(std::io::stderr()))
    };

    let mut human_mode = HumanMode::new(
        config,
        HighScoreStore::new(cli.high_score_file),
        audio,
        cli.seed,
    );
    human_mode.run().await?;

    Ok(())
}
