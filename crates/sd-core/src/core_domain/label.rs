use serde::Deserialize;

use crate::core::SentimentLabel;

const POSITIVE_WORDS: &[&str] = &["4", "5", "good", "great", "excellent", "love", "loved"];
const NEGATIVE_WORDS: &[&str] = &["1", "2", "bad", "terrible", "poor", "awful", "worst"];
const NEUTRAL_WORDS: &[&str] = &["3", "okay", "ok", "neutral", "average"];

// ---------------------------------------------------------------------------
// normalize — raw ground-truth annotation to a SentimentLabel
// ---------------------------------------------------------------------------

/// Maps a raw annotation to a label, falling back to `Neutral` when nothing
/// matches.
///
/// Matching is case-insensitive on the trimmed value. Rules are tried in the
/// order Positive, Negative, Neutral: a substring (`pos`, `neg`, `neu`) or an
/// exact keyword hit wins.
pub fn normalize(raw: &str) -> SentimentLabel {
    normalize_strict(raw).unwrap_or(SentimentLabel::Neutral)
}

/// [`normalize`] for annotations that may be absent or non-textual.
pub fn normalize_opt(raw: Option<&str>) -> SentimentLabel {
    raw.map_or(SentimentLabel::Neutral, normalize)
}

/// Like [`normalize`] but returns `None` instead of the `Neutral` fallback.
pub fn normalize_strict(raw: &str) -> Option<SentimentLabel> {
    let value = raw.trim().to_lowercase();
    let value = value.as_str();

    if value.contains("pos") || POSITIVE_WORDS.contains(&value) {
        return Some(SentimentLabel::Positive);
    }
    if value.contains("neg") || NEGATIVE_WORDS.contains(&value) {
        return Some(SentimentLabel::Negative);
    }
    if value.contains("neu") || NEUTRAL_WORDS.contains(&value) {
        return Some(SentimentLabel::Neutral);
    }
    None
}

// ---------------------------------------------------------------------------
// LabelPolicy — how unrecognized annotations are treated
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabelPolicy {
    /// Unrecognized annotations count as `Neutral`.
    #[default]
    Lenient,
    /// Rows with unrecognized annotations are not eligible for play.
    Strict,
}

impl LabelPolicy {
    pub fn accepts(&self, raw: &str) -> bool {
        match self {
            LabelPolicy::Lenient => true,
            LabelPolicy::Strict => normalize_strict(raw).is_some(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
