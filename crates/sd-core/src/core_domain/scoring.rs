use serde::Serialize;

use crate::core::{Answer, Round, ScoringError, SentimentClassifier, SentimentLabel};

// ---------------------------------------------------------------------------
// Scoreboard — cumulative counters (monotone within a game)
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Scoreboard {
    pub human: u32,
    pub ai: u32,
    pub agreement: u32,
}

// ---------------------------------------------------------------------------
// RoundRecord — immutable history snapshot of a resolved round
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RoundRecord {
    pub round: u32,
    pub review: String,
    pub truth: SentimentLabel,
    pub human: Answer,
    pub ai: SentimentLabel,
    pub ai_polarity: f64,
    pub human_correct: bool,
    pub ai_correct: bool,
    pub agreed: bool,
}

impl RoundRecord {
    pub fn timed_out(&self) -> bool {
        self.human.is_timed_out()
    }

    /// Human right, classifier wrong.
    pub fn is_upset(&self) -> bool {
        self.human_correct && !self.ai_correct
    }
}

// ---------------------------------------------------------------------------
// ScoringEngine — answer comparison and history append
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub struct ScoringEngine {
    classifier: SentimentClassifier,
}

impl ScoringEngine {
    pub fn new(classifier: SentimentClassifier) -> Self {
        Self { classifier }
    }

    /// Scores `round` against `answer`, appends its snapshot to `history`
    /// and marks it resolved.
    ///
    /// A timed-out answer only scores the classifier and never counts as
    /// agreement. Resolving twice returns `AlreadyResolved` and leaves the
    /// scoreboard and history untouched.
    pub fn resolve(
        &self,
        round: &mut Round,
        answer: Answer,
        scores: &mut Scoreboard,
        history: &mut Vec<RoundRecord>,
    ) -> Result<RoundRecord, ScoringError> {
        if round.is_resolved() || !round.set_answer(answer) {
            return Err(ScoringError::AlreadyResolved {
                round: round.number(),
            });
        }

        let ai = round.classify_with(|text| self.classifier.classify(text));
        let truth = round.truth();
        let ai_correct = ai.label == truth;
        let (human_correct, agreed) = match answer {
            Answer::Label(human) => (human == truth, human == ai.label),
            Answer::TimedOut => (false, false),
        };

        if human_correct {
            scores.human += 1;
        }
        if ai_correct {
            scores.ai += 1;
        }
        if agreed {
            scores.agreement += 1;
        }

        let record = RoundRecord {
            round: round.number(),
            review: round.review().to_owned(),
            truth,
            human: answer,
            ai: ai.label,
            ai_polarity: ai.polarity,
            human_correct,
            ai_correct,
            agreed,
        };
        history.push(record.clone());
        round.mark_resolved();

        Ok(record)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
