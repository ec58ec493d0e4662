use std::time::Instant;

use crate::core::{Answer, Classification, DatasetItem, SentimentLabel};

// ---------------------------------------------------------------------------
// Round — the live unit of play
// ---------------------------------------------------------------------------

/// One live round. Answer and classification are write-once; the round is
/// absorbed into history as a `RoundRecord` when it resolves.
#[derive(Clone, Debug)]
pub struct Round {
    number: u32,
    item_index: usize,
    item: DatasetItem,
    truth: SentimentLabel,
    human_answer: Option<Answer>,
    ai: Option<Classification>,
    started_at: Instant,
    time_up: bool,
    resolved: bool,
}

impl Round {
    pub(crate) fn new(
        number: u32,
        item_index: usize,
        item: DatasetItem,
        truth: SentimentLabel,
        started_at: Instant,
    ) -> Self {
        Self {
            number,
            item_index,
            item,
            truth,
            human_answer: None,
            ai: None,
            started_at,
            time_up: false,
            resolved: false,
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn item_index(&self) -> usize {
        self.item_index
    }

    pub fn review(&self) -> &str {
        self.item.review()
    }

    pub fn truth(&self) -> SentimentLabel {
        self.truth
    }

    pub fn human_answer(&self) -> Option<Answer> {
        self.human_answer
    }

    pub fn ai(&self) -> Option<Classification> {
        self.ai
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    pub fn is_time_up(&self) -> bool {
        self.time_up
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Returns `false` if an answer was already recorded.
    pub(crate) fn set_answer(&mut self, answer: Answer) -> bool {
        if self.human_answer.is_some() {
            return false;
        }
        self.human_answer = Some(answer);
        true
    }

    /// Classifies at most once; later calls return the first result.
    pub(crate) fn classify_with(
        &mut self,
        classify: impl FnOnce(&str) -> Classification,
    ) -> Classification {
        match self.ai {
            Some(existing) => existing,
            None => {
                let result = classify(self.item.review());
                self.ai = Some(result);
                result
            }
        }
    }

    /// Consumes the one-shot expiry flag. Returns `true` only the first time.
    pub(crate) fn take_time_up(&mut self) -> bool {
        if self.time_up || self.resolved {
            return false;
        }
        self.time_up = true;
        true
    }

    pub(crate) fn mark_resolved(&mut self) {
        self.resolved = true;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
