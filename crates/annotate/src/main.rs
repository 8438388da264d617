use std::io::Write;
use std::path::PathBuf;

use annotate::config::AnnotateConfig;
use annotate::{pgn, report};
use anyhow::{Context, Result};
use chess_analysis::GameAnalyzer;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "chess-annotate")]
#[command(version)]
#[command(about = "Rate every move of a chess game with a UCI engine")]
struct Cli {
    /// PGN file or plain move list (SAN or UCI)
    input: PathBuf,
    /// Path to the UCI engine
    #[arg(short, long)]
    engine: Option<String>,
    /// Search time per position in milliseconds
    #[arg(short, long)]
    movetime: Option<u64>,
    /// Fixed search depth (replaces movetime)
    #[arg(short, long)]
    depth: Option<u32>,
    /// Engine threads
    #[arg(short, long)]
    threads: Option<u32>,
    /// Write a JSON annotation file
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Configuration file (defaults to ./annotate.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl Cli {
    /// Applies command-line overrides on top of the file configuration.
    fn apply(&self, config: &mut AnnotateConfig) {
        if let Some(engine) = &self.engine {
            config.engine_path = engine.clone();
        }
        if let Some(movetime) = self.movetime {
            config.movetime_ms = movetime;
            config.depth = None;
        }
        if let Some(depth) = self.depth {
            config.depth = Some(depth);
        }
        if let Some(threads) = self.threads {
            config.threads = threads;
        }
    }
}

/// Builds the log filter from `RUST_LOG` directives, defaulting to `info`.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| "info".into())
}

fn main() -> Result<()> {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(directives.as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config =
        AnnotateConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.apply(&mut config);

    let text = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;
    let game = pgn::parse_game(&text)
        .with_context(|| format!("Failed to read game from {}", cli.input.display()))?;
    info!(plies = game.input.plies.len(), "Loaded game");

    let mut analyzer = GameAnalyzer::new(&config.engine_path, config.analysis_config())
        .with_context(|| format!("Failed to start engine {}", config.engine_path))?;
    analyzer
        .source_mut()
        .set_option("Threads", &config.threads.to_string())
        .context("Failed to set engine threads")?;
    if let Some(hash) = config.hash_mb {
        analyzer
            .source_mut()
            .set_option("Hash", &hash.to_string())
            .context("Failed to set engine hash size")?;
    }

    let analysis = analyzer
        .analyze_game(&game.input)
        .context("Analysis failed")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    report::write_text(&mut out, &game, &analysis)?;
    out.flush()?;

    if let Some(path) = &cli.output {
        report::write_json(path, &game, &config.engine_path, &analysis)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), "Wrote annotation file");
    }

    Ok(())
}
