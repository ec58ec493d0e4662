use std::sync::Arc;

use serde::Serialize;

use crate::core::{PolarityScorer, SentimentLabel};

/// Polarity must strictly exceed this magnitude to leave `Neutral`.
pub const POLARITY_THRESHOLD: f64 = 0.15;

// ---------------------------------------------------------------------------
// label_for_polarity — fixed-threshold decision rule (pure)
// ---------------------------------------------------------------------------

pub fn label_for_polarity(polarity: f64) -> SentimentLabel {
    if polarity > POLARITY_THRESHOLD {
        SentimentLabel::Positive
    } else if polarity < -POLARITY_THRESHOLD {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Classification {
    pub label: SentimentLabel,
    pub polarity: f64,
}

// ---------------------------------------------------------------------------
// SentimentClassifier — scorer + decision rule
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct SentimentClassifier {
    scorer: Arc<dyn PolarityScorer>,
}

impl SentimentClassifier {
    pub fn new(scorer: Arc<dyn PolarityScorer>) -> Self {
        Self { scorer }
    }

    /// Never fails. A non-finite polarity from the scorer is read as 0.0.
    pub fn classify(&self, text: &str) -> Classification {
        let raw = self.scorer.polarity(text);
        let polarity = if raw.is_finite() { raw } else { 0.0 };
        Classification {
            label: label_for_polarity(polarity),
            polarity,
        }
    }
}

impl std::fmt::Debug for SentimentClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentimentClassifier")
            .field("threshold", &POLARITY_THRESHOLD)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
