use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use super::timer::observe_expiry;
use crate::core::{
    pick, remaining, Answer, Clock, Dataset, GameError, PolarityScorer, RandomSource, Round,
    RoundRecord, Scoreboard, ScoringEngine, SentimentClassifier, SentimentLabel, SetupError,
    TransitionError, Trigger,
};

pub const MIN_ROUNDS: u32 = 5;
pub const MAX_ROUNDS: u32 = 30;

// ---------------------------------------------------------------------------
// Phase — session lifecycle states
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Phase {
    Setup,
    Active,
    Resolved,
    GameOver,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Setup => "in setup",
            Phase::Active => "active",
            Phase::Resolved => "resolved",
            Phase::GameOver => "over",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// TimerPoll — result of observing the round timer
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
pub enum TimerPoll {
    /// No round is live.
    Idle,
    /// Rounds have no time limit.
    Untimed,
    Running { remaining_secs: u64 },
    /// This observation expired the round and resolved it.
    Expired(RoundRecord),
}

#[derive(Clone, Debug, PartialEq)]
pub enum SkipOutcome {
    /// A fresh review replaced the live one.
    Skipped,
    /// The round ran out before the skip and resolved as timed out.
    Expired(RoundRecord),
}

// ---------------------------------------------------------------------------
// GameSummary — final standings
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Winner {
    Human,
    Ai,
    Tie,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct GameSummary {
    pub total_rounds: u32,
    pub scores: Scoreboard,
    pub winner: Winner,
}

impl GameSummary {
    pub fn from_scores(total_rounds: u32, scores: Scoreboard) -> Self {
        let winner = match scores.human.cmp(&scores.ai) {
            std::cmp::Ordering::Greater => Winner::Human,
            std::cmp::Ordering::Less => Winner::Ai,
            std::cmp::Ordering::Equal => Winner::Tie,
        };
        Self {
            total_rounds,
            scores,
            winner,
        }
    }
}

// ---------------------------------------------------------------------------
// SessionPorts — external collaborators injected into a session
// ---------------------------------------------------------------------------

pub struct SessionPorts {
    pub clock: Arc<dyn Clock>,
    pub scorer: Arc<dyn PolarityScorer>,
    pub random: Box<dyn RandomSource>,
}

// ---------------------------------------------------------------------------
// Session — the game state machine
// ---------------------------------------------------------------------------

/// Drives a single game: `Setup → Active ⇄ Resolved → GameOver → Setup`.
///
/// Every trigger runs to completion synchronously. Timer expiry is only
/// noticed when a trigger observes it (`poll_timer`, `submit_answer`,
/// `skip`), never in the background.
pub struct Session {
    phase: Phase,
    round_number: u32,
    total_rounds: u32,
    scores: Scoreboard,
    history: Vec<RoundRecord>,
    dataset: Option<Dataset>,
    current: Option<Round>,
    time_limit_secs: Option<u64>,
    engine: ScoringEngine,
    clock: Arc<dyn Clock>,
    random: Box<dyn RandomSource>,
}

impl Session {
    pub fn new(ports: SessionPorts) -> Self {
        Self {
            phase: Phase::Setup,
            round_number: 0,
            total_rounds: 0,
            scores: Scoreboard::default(),
            history: Vec::new(),
            dataset: None,
            current: None,
            time_limit_secs: None,
            engine: ScoringEngine::new(SentimentClassifier::new(ports.scorer)),
            clock: ports.clock,
            random: ports.random,
        }
    }

    /// Limits every round to `secs` seconds. `None` disables the timer.
    pub fn with_time_limit(self, secs: Option<u64>) -> Self {
        Self {
            time_limit_secs: secs.filter(|s| *s > 0),
            ..self
        }
    }

    // -- Read accessors --

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    pub fn progress(&self) -> (u32, u32) {
        (self.round_number, self.total_rounds)
    }

    pub fn scores(&self) -> Scoreboard {
        self.scores
    }

    pub fn human_score(&self) -> u32 {
        self.scores.human
    }

    pub fn ai_score(&self) -> u32 {
        self.scores.ai
    }

    pub fn agreement_count(&self) -> u32 {
        self.scores.agreement
    }

    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }

    /// The record of the round just resolved, while in `Resolved`.
    pub fn last_result(&self) -> Option<&RoundRecord> {
        match self.phase {
            Phase::Resolved => self.history.last(),
            _ => None,
        }
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn current_round(&self) -> Option<&Round> {
        self.current.as_ref()
    }

    pub fn current_review(&self) -> Option<&str> {
        self.current.as_ref().map(Round::review)
    }

    pub fn time_limit_secs(&self) -> Option<u64> {
        self.time_limit_secs
    }

    /// Seconds left in the live round; `None` when untimed or no round is
    /// live. Reading this never resolves the round; use [`Self::poll_timer`].
    pub fn remaining_secs(&self) -> Option<u64> {
        let limit = self.time_limit_secs?;
        let round = self.live_round()?;
        Some(remaining(round, limit, self.clock.now()))
    }

    // -- Triggers --

    /// `Setup → Active`. Validates before touching any state.
    pub fn configure(&mut self, dataset: Dataset, total_rounds: u32) -> Result<(), GameError> {
        self.expect_phase(Trigger::Configure, Phase::Setup)?;
        if !(MIN_ROUNDS..=MAX_ROUNDS).contains(&total_rounds) {
            return Err(SetupError::InvalidRoundCount {
                requested: total_rounds,
                min: MIN_ROUNDS,
                max: MAX_ROUNDS,
            }
            .into());
        }
        if dataset.is_empty() {
            return Err(SetupError::EmptyDataset.into());
        }

        let first = pick(&dataset, self.random.as_mut(), 1, self.clock.now())?;
        self.scores = Scoreboard::default();
        self.history.clear();
        self.total_rounds = total_rounds;
        self.round_number = 1;
        self.dataset = Some(dataset);
        self.current = Some(first);
        self.phase = Phase::Active;
        Ok(())
    }

    /// `Active → Resolved` with the human's label.
    ///
    /// If the deadline already passed, the round resolves as timed out
    /// instead and the returned record carries [`Answer::TimedOut`].
    pub fn submit_answer(&mut self, label: SentimentLabel) -> Result<RoundRecord, GameError> {
        self.expect_phase(Trigger::SubmitAnswer, Phase::Active)?;
        if let TimerPoll::Expired(record) = self.poll_timer()? {
            return Ok(record);
        }
        self.resolve_current(Answer::Label(label))
    }

    /// Observes the timer; the first observation past the deadline resolves
    /// the round with the timeout sentinel.
    pub fn poll_timer(&mut self) -> Result<TimerPoll, GameError> {
        if self.phase != Phase::Active {
            return Ok(TimerPoll::Idle);
        }
        let Some(limit) = self.time_limit_secs else {
            return Ok(TimerPoll::Untimed);
        };
        let now = self.clock.now();
        let Some(round) = self.current.as_mut() else {
            return Ok(TimerPoll::Idle);
        };

        if observe_expiry(round, limit, now) {
            let record = self.resolve_current(Answer::TimedOut)?;
            return Ok(TimerPoll::Expired(record));
        }
        Ok(TimerPoll::Running {
            remaining_secs: remaining(round, limit, now),
        })
    }

    /// Replaces the live review without scoring; the round number and
    /// history are unchanged and the timer restarts.
    ///
    /// If the deadline already passed, the round resolves as timed out
    /// instead and the outcome carries that record.
    pub fn skip(&mut self) -> Result<SkipOutcome, GameError> {
        self.expect_phase(Trigger::Skip, Phase::Active)?;
        if let TimerPoll::Expired(record) = self.poll_timer()? {
            return Ok(SkipOutcome::Expired(record));
        }

        let replacement = self.pick_round(self.round_number)?;
        self.current = Some(replacement);
        Ok(SkipOutcome::Skipped)
    }

    /// `Resolved → Active` for the next round, or `Resolved → GameOver`
    /// after the last one.
    pub fn advance(&mut self) -> Result<Phase, GameError> {
        self.expect_phase(Trigger::Advance, Phase::Resolved)?;

        if self.round_number >= self.total_rounds {
            self.current = None;
            self.phase = Phase::GameOver;
            return Ok(self.phase);
        }

        let next = self.pick_round(self.round_number + 1)?;
        self.round_number += 1;
        self.current = Some(next);
        self.phase = Phase::Active;
        Ok(self.phase)
    }

    /// Returns to `Setup` from any phase, discarding the live round, the
    /// scores, the history and the dataset.
    pub fn reset(&mut self) {
        self.phase = Phase::Setup;
        self.round_number = 0;
        self.total_rounds = 0;
        self.scores = Scoreboard::default();
        self.history.clear();
        self.dataset = None;
        self.current = None;
    }

    pub fn summary(&self) -> Result<GameSummary, GameError> {
        self.expect_phase(Trigger::Summary, Phase::GameOver)?;
        Ok(GameSummary::from_scores(self.total_rounds, self.scores))
    }

    // -- Internals --

    fn expect_phase(&self, trigger: Trigger, phase: Phase) -> Result<(), TransitionError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(TransitionError::InvalidPhase {
                trigger,
                phase: self.phase,
            })
        }
    }

    fn live_round(&self) -> Option<&Round> {
        match self.phase {
            Phase::Active => self.current.as_ref(),
            _ => None,
        }
    }

    fn pick_round(&mut self, number: u32) -> Result<Round, GameError> {
        let dataset = self.dataset.as_ref().ok_or(SetupError::EmptyDataset)?;
        Ok(pick(dataset, self.random.as_mut(), number, self.clock.now())?)
    }

    fn resolve_current(&mut self, answer: Answer) -> Result<RoundRecord, GameError> {
        let round = self.current.as_mut().ok_or(TransitionError::InvalidPhase {
            trigger: Trigger::SubmitAnswer,
            phase: self.phase,
        })?;
        let record = self
            .engine
            .resolve(round, answer, &mut self.scores, &mut self.history)?;
        self.phase = Phase::Resolved;
        Ok(record)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("phase", &self.phase)
            .field("round_number", &self.round_number)
            .field("total_rounds", &self.total_rounds)
            .field("scores", &self.scores)
            .field("history_len", &self.history.len())
            .field("time_limit_secs", &self.time_limit_secs)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
