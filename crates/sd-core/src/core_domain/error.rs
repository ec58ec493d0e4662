use std::fmt;

use crate::core::Phase;

// ---------------------------------------------------------------------------
// Trigger — external operations that drive the session
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    Configure,
    SubmitAnswer,
    Skip,
    Advance,
    Summary,
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Trigger::Configure => "configure",
            Trigger::SubmitAnswer => "submit an answer",
            Trigger::Skip => "skip",
            Trigger::Advance => "advance",
            Trigger::Summary => "summarize",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Sub-error types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("dataset has no eligible rows")]
    EmptyDataset,
    #[error("round count {requested} is outside {min}..={max}")]
    InvalidRoundCount { requested: u32, min: u32, max: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("cannot {trigger} while the session is {phase}")]
    InvalidPhase { trigger: Trigger, phase: Phase },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    #[error("round {round} is already resolved")]
    AlreadyResolved { round: u32 },
}

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error(transparent)]
    Setup(#[from] SetupError),
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
