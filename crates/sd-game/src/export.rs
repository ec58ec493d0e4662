use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use sd_core::core::RoundRecord;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write history: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to write CSV history: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write JSON history: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// `.json` selects JSON; anything else is CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ExportFormat::Json,
            _ => ExportFormat::Csv,
        }
    }
}

/// One row of the round-by-round history table.
#[derive(Debug, Serialize)]
struct HistoryRow<'a> {
    #[serde(rename = "Round")]
    round: u32,
    #[serde(rename = "Truth")]
    truth: &'a str,
    #[serde(rename = "Human Guess")]
    human: &'a str,
    #[serde(rename = "AI Guess")]
    ai: &'a str,
    #[serde(rename = "AI Polarity")]
    ai_polarity: String,
    #[serde(rename = "Review")]
    review: &'a str,
}

impl<'a> From<&'a RoundRecord> for HistoryRow<'a> {
    fn from(record: &'a RoundRecord) -> Self {
        Self {
            round: record.round,
            truth: record.truth.as_str(),
            human: record.human.as_str(),
            ai: record.ai.as_str(),
            ai_polarity: format!("{:.3}", record.ai_polarity),
            review: &record.review,
        }
    }
}

pub fn write_history<W: Write>(
    writer: W,
    history: &[RoundRecord],
    format: ExportFormat,
) -> Result<(), ExportError> {
    match format {
        ExportFormat::Csv => {
            let mut csv_writer = csv::Writer::from_writer(writer);
            for record in history {
                csv_writer.serialize(HistoryRow::from(record))?;
            }
            csv_writer.flush()?;
        }
        ExportFormat::Json => {
            let mut writer = writer;
            serde_json::to_writer_pretty(&mut writer, history)?;
            writer.write_all(b"\n")?;
        }
    }
    Ok(())
}

/// Writes `history` to `path`, choosing the format from its extension.
pub fn export_history(path: &Path, history: &[RoundRecord]) -> Result<ExportFormat, ExportError> {
    let format = ExportFormat::from_path(path);
    let file = std::fs::File::create(path)?;
    write_history(std::io::BufWriter::new(file), history, format)?;
    tracing::info!(path = %path.display(), rounds = history.len(), "exported history");
    Ok(format)
}

pub fn default_export_path(now: DateTime<Utc>) -> PathBuf {
    PathBuf::from(format!("sentiment-duel-{}.csv", now.format("%Y%m%dT%H%M%SZ")))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
