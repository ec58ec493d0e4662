use std::path::PathBuf;
use std::sync::Arc;

use anyhow::ensure;
use sd_core::core::{Session, SessionPorts, SystemClock, MAX_ROUNDS, MIN_ROUNDS};

use crate::config::{AppConfig, LogFormat};
use crate::lexicon::LexiconScorer;
use crate::loader::LoadOptions;
use crate::random::RngSource;

// ---------------------------------------------------------------------------
// Overrides — command-line values that win over the config file
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub dataset: Option<PathBuf>,
    pub rounds: Option<u32>,
    pub time_limit_secs: Option<u64>,
    pub seed: Option<u64>,
}

impl Overrides {
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(path) = &self.dataset {
            config.dataset.path = path.clone();
        }
        if let Some(rounds) = self.rounds {
            config.game.rounds = rounds;
        }
        if let Some(secs) = self.time_limit_secs {
            config.game.time_limit_secs = Some(secs);
        }
        if let Some(seed) = self.seed {
            config.game.seed = Some(seed);
        }
    }
}

// ---------------------------------------------------------------------------
// RuntimeConfig — fully validated runtime configuration
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub rounds: u32,
    pub time_limit_secs: Option<u64>,
    pub seed: Option<u64>,
    pub dataset_path: PathBuf,
    pub load_options: LoadOptions,
    /// Lexicon additions, sorted by word.
    pub lexicon: Vec<(String, f64)>,
    pub log_level: String,
    pub log_format: LogFormat,
}

// ---------------------------------------------------------------------------
// into_runtime — converts raw AppConfig into validated RuntimeConfig
// ---------------------------------------------------------------------------

pub fn into_runtime(config: AppConfig) -> Result<RuntimeConfig, anyhow::Error> {
    let game = config.game;
    ensure!(
        (MIN_ROUNDS..=MAX_ROUNDS).contains(&game.rounds),
        "rounds must be between {MIN_ROUNDS} and {MAX_ROUNDS}, got {}",
        game.rounds
    );
    if let Some(secs) = game.time_limit_secs {
        ensure!(secs > 0, "time_limit_secs must be positive when set");
    }

    let dataset = config.dataset;
    ensure!(
        !dataset.path.as_os_str().is_empty(),
        "dataset path must not be empty"
    );
    ensure!(
        dataset.delimiter.len() == 1 && dataset.delimiter.is_ascii(),
        "delimiter must be a single ASCII character, got {:?}",
        dataset.delimiter
    );
    let review_column = dataset.review_column.trim().to_owned();
    let sentiment_column = dataset.sentiment_column.trim().to_owned();
    ensure!(!review_column.is_empty(), "review_column must not be empty");
    ensure!(
        !sentiment_column.is_empty(),
        "sentiment_column must not be empty"
    );
    ensure!(
        review_column != sentiment_column,
        "review_column and sentiment_column must differ"
    );

    let mut lexicon = Vec::with_capacity(config.classifier.lexicon.len());
    for (word, polarity) in config.classifier.lexicon {
        ensure!(
            !word.is_empty() && !word.contains(char::is_whitespace),
            "lexicon word must be a single token: {word:?}"
        );
        ensure!(
            polarity.is_finite() && (-1.0..=1.0).contains(&polarity),
            "lexicon polarity for {word:?} must be within -1..=1, got {polarity}"
        );
        lexicon.push((word, polarity));
    }
    lexicon.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(RuntimeConfig {
        rounds: game.rounds,
        time_limit_secs: game.time_limit_secs,
        seed: game.seed,
        dataset_path: dataset.path,
        load_options: LoadOptions {
            review_column,
            sentiment_column,
            delimiter: dataset.delimiter.as_bytes()[0],
            policy: game.label_policy,
        },
        lexicon,
        log_level: config.logging.level,
        log_format: config.logging.format,
    })
}

/// Wires a session to the system clock, the lexicon scorer and an RNG.
pub fn build_session(runtime: &RuntimeConfig) -> Session {
    let scorer = LexiconScorer::new().with_overrides(runtime.lexicon.iter().cloned());
    Session::new(SessionPorts {
        clock: Arc::new(SystemClock),
        scorer: Arc::new(scorer),
        random: Box::new(RngSource::new(runtime.seed)),
    })
    .with_time_limit(runtime.time_limit_secs)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
