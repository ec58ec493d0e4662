#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use sd_core::core::{Dataset, ManualClock, Session, SessionPorts};
use sd_game::bootstrap::{self, RuntimeConfig};
use sd_game::config::AppConfig;
use sd_game::controller::GameController;
use sd_game::lexicon::LexiconScorer;
use sd_game::loader::load_dataset;
use sd_game::random::RngSource;
use tempfile::TempDir;

pub const SAMPLE_REVIEWS: &str = "\
review,sentiment,stars
\"Absolutely loved it, the best kettle I have owned\",positive,5
Terrible. Broke after a week,negative,1
It is a kettle,neutral,3
\"Not bad, not great\",mixed,3
,positive,4
Good value,,4
Awful customer service,neg,1
Wonderful gift for my mother,pos,5
";

// ---------------------------------------------------------------------------
// TestGame — temp directory holding a dataset and a config file
// ---------------------------------------------------------------------------

pub struct TestGame {
    dir: TempDir,
    pub csv_path: PathBuf,
    pub config_path: PathBuf,
}

impl TestGame {
    pub fn new(config_body: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let csv_path = write_file(dir.path(), "reviews.csv", SAMPLE_REVIEWS);
        let config = format!(
            "[dataset]\npath = {:?}\n\n{config_body}",
            csv_path.display().to_string()
        );
        let config_path = write_file(dir.path(), "sentiment-duel.toml", &config);
        Self {
            dir,
            csv_path,
            config_path,
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn runtime(&self) -> RuntimeConfig {
        let config = AppConfig::from_file(&self.config_path).expect("config should parse");
        bootstrap::into_runtime(config).expect("config should validate")
    }

    pub fn dataset(&self) -> Dataset {
        let runtime = self.runtime();
        load_dataset(&runtime.dataset_path, &runtime.load_options)
            .expect("dataset should load")
            .dataset
    }
}

pub fn write_file(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).expect("write fixture");
    path
}

/// Controller over a manual clock so tests can run out the timer.
pub fn manual_controller(time_limit_secs: Option<u64>, seed: u64) -> (GameController, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    let session = Session::new(SessionPorts {
        clock: clock.clone(),
        scorer: Arc::new(LexiconScorer::new()),
        random: Box::new(RngSource::seeded(seed)),
    })
    .with_time_limit(time_limit_secs);
    (GameController::new(session), clock)
}
