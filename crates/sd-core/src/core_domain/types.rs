use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::core::LabelPolicy;

// ---------------------------------------------------------------------------
// SentimentLabel — closed three-valued sentiment set
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Answer — a human submission or the timeout sentinel
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Answer {
    Label(SentimentLabel),
    /// The round expired before the human answered.
    TimedOut,
}

impl Answer {
    pub fn label(&self) -> Option<SentimentLabel> {
        match self {
            Answer::Label(label) => Some(*label),
            Answer::TimedOut => None,
        }
    }

    pub fn is_timed_out(&self) -> bool {
        matches!(self, Answer::TimedOut)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Answer::Label(label) => label.as_str(),
            Answer::TimedOut => "TimedOut",
        }
    }
}

impl From<SentimentLabel> for Answer {
    fn from(label: SentimentLabel) -> Self {
        Answer::Label(label)
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Answer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DatasetItem — one (review, raw annotation) pair
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatasetItem {
    review: String,
    sentiment: String,
}

impl DatasetItem {
    pub fn new(review: impl Into<String>, sentiment: impl Into<String>) -> Self {
        Self {
            review: review.into(),
            sentiment: sentiment.into(),
        }
    }

    pub fn review(&self) -> &str {
        &self.review
    }

    pub fn sentiment(&self) -> &str {
        &self.sentiment
    }

    /// Both fields must carry non-whitespace text.
    pub fn is_eligible(&self) -> bool {
        !self.review.trim().is_empty() && !self.sentiment.trim().is_empty()
    }
}

// ---------------------------------------------------------------------------
// Dataset — eligible items only
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dataset {
    items: Vec<DatasetItem>,
}

impl Dataset {
    /// Builds a dataset with the lenient label policy.
    pub fn new(items: impl IntoIterator<Item = DatasetItem>) -> Self {
        Self::with_policy(items, LabelPolicy::Lenient)
    }

    /// Drops ineligible items. Under [`LabelPolicy::Strict`] items whose
    /// annotation is not recognized are dropped as well.
    pub fn with_policy(items: impl IntoIterator<Item = DatasetItem>, policy: LabelPolicy) -> Self {
        let items = items
            .into_iter()
            .filter(|item| item.is_eligible() && policy.accepts(item.sentiment()))
            .collect();
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&DatasetItem> {
        self.items.get(index)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
