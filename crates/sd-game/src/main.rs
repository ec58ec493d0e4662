use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use sd_game::bootstrap::{self, Overrides, RuntimeConfig};
use sd_game::config::AppConfig;
use sd_game::controller::GameController;
use sd_game::export::default_export_path;
use sd_game::loader::load_dataset;
use sd_game::logging::init_logging;
use sd_game::play::{self, PlayOptions};

#[derive(Parser)]
#[command(name = "sd", about = "Sentiment Duel: guess review sentiment against an AI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to the configuration file.
    #[arg(short, long, default_value = "sentiment-duel.toml", global = true)]
    config: PathBuf,

    /// CSV of reviews; overrides `[dataset] path`.
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,

    /// Rounds per game (5 to 30).
    #[arg(long, global = true)]
    rounds: Option<u32>,

    /// Seconds allowed per round.
    #[arg(long, global = true)]
    time_limit: Option<u64>,

    /// Seed for review selection, for repeatable games.
    #[arg(long, global = true)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Command {
    /// Play in the terminal (the default).
    Play {
        /// Save the round history when a game ends. Without a path, a
        /// timestamped CSV is written to the current directory.
        #[arg(long, value_name = "PATH", num_args = 0..=1)]
        export: Option<Option<PathBuf>>,
    },
    /// Validate configuration and dataset, then exit.
    Validate,
}

fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        Some(Command::Validate) => run_validate(&cli),
        Some(Command::Play { export }) => run_play(&cli, export.clone()),
        None => run_play(&cli, None),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn load_runtime(cli: &Cli) -> anyhow::Result<RuntimeConfig> {
    let mut config = if cli.config.exists() {
        AppConfig::from_file(&cli.config)
            .with_context(|| format!("reading config {}", cli.config.display()))?
    } else if let Some(path) = &cli.dataset {
        AppConfig::for_dataset(path.clone())
    } else {
        anyhow::bail!(
            "config file {} not found; pass --dataset to play without one",
            cli.config.display()
        );
    };

    Overrides {
        dataset: cli.dataset.clone(),
        rounds: cli.rounds,
        time_limit_secs: cli.time_limit,
        seed: cli.seed,
    }
    .apply(&mut config);

    bootstrap::into_runtime(config).context("invalid configuration")
}

fn config_label(path: &Path) -> String {
    if path.exists() {
        path.display().to_string()
    } else {
        "built-in defaults".to_owned()
    }
}

fn run_validate(cli: &Cli) -> anyhow::Result<()> {
    let runtime = load_runtime(cli)?;
    init_logging(&runtime.log_level, runtime.log_format);

    let loaded = load_dataset(&runtime.dataset_path, &runtime.load_options)
        .with_context(|| format!("loading dataset {}", runtime.dataset_path.display()))?;

    println!("Config valid: {}", config_label(&cli.config));
    println!(
        "Dataset {}: {} playable rows ({} dropped)",
        runtime.dataset_path.display(),
        loaded.dataset.len(),
        loaded.dropped_rows
    );
    Ok(())
}

fn run_play(cli: &Cli, export: Option<Option<PathBuf>>) -> anyhow::Result<()> {
    let runtime = load_runtime(cli)?;
    init_logging(&runtime.log_level, runtime.log_format);

    let loaded = load_dataset(&runtime.dataset_path, &runtime.load_options)
        .with_context(|| format!("loading dataset {}", runtime.dataset_path.display()))?;

    let options = PlayOptions {
        rounds: runtime.rounds,
        export_path: export
            .map(|path| path.unwrap_or_else(|| default_export_path(chrono::Utc::now()))),
    };
    let controller = GameController::new(bootstrap::build_session(&runtime));
    tracing::debug!(session = %controller.id(), "session created");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    play::run(
        &controller,
        &loaded.dataset,
        &options,
        &mut stdin.lock(),
        &mut stdout.lock(),
    )
}
