use std::sync::{Mutex, MutexGuard};

use sd_core::core::{
    Dataset, GameError, GameSummary, Phase, RoundRecord, Scoreboard, SentimentLabel, Session,
    SkipOutcome, TimerPoll,
};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// SessionView — read-only copy of the session for rendering
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
pub struct SessionView {
    pub phase: Phase,
    pub round_number: u32,
    pub total_rounds: u32,
    pub scores: Scoreboard,
    pub review: Option<String>,
    pub remaining_secs: Option<u64>,
    pub time_limit_secs: Option<u64>,
    pub last_result: Option<RoundRecord>,
}

// ---------------------------------------------------------------------------
// GameController — serializes triggers for one session
// ---------------------------------------------------------------------------

/// Owns a [`Session`] behind a single mutex. Each trigger holds the lock
/// for its whole run, so concurrent triggers for the session never
/// interleave.
pub struct GameController {
    id: Uuid,
    session: Mutex<Session>,
}

impl GameController {
    pub fn new(session: Session) -> Self {
        Self {
            id: Uuid::new_v4(),
            session: Mutex::new(session),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().expect("session mutex poisoned")
    }

    pub fn start(&self, dataset: Dataset, total_rounds: u32) -> Result<(), GameError> {
        let mut session = self.lock();
        self.configure_locked(&mut session, dataset, total_rounds)
    }

    /// Abandons whatever is in progress and starts a new game, under one
    /// lock so no other trigger runs between the reset and the new game.
    pub fn restart(&self, dataset: Dataset, total_rounds: u32) -> Result<(), GameError> {
        let mut session = self.lock();
        let abandoned = session.phase();
        session.reset();
        tracing::info!(session = %self.id, from = ?abandoned, "session reset");
        self.configure_locked(&mut session, dataset, total_rounds)
    }

    pub fn submit_answer(&self, label: SentimentLabel) -> Result<RoundRecord, GameError> {
        let mut session = self.lock();
        let result = session.submit_answer(label);
        self.log_resolution(&result, "answer");
        result
    }

    pub fn poll_timer(&self) -> Result<TimerPoll, GameError> {
        let mut session = self.lock();
        let poll = session.poll_timer()?;
        if let TimerPoll::Expired(record) = &poll {
            tracing::debug!(session = %self.id, round = record.round, "round timed out");
        }
        Ok(poll)
    }

    pub fn skip(&self) -> Result<SkipOutcome, GameError> {
        let mut session = self.lock();
        let outcome = session.skip().inspect_err(|err| {
            tracing::warn!(session = %self.id, error = %err, "skip rejected");
        })?;
        match &outcome {
            SkipOutcome::Skipped => tracing::debug!(
                session = %self.id,
                round = session.round_number(),
                "review skipped"
            ),
            SkipOutcome::Expired(record) => {
                tracing::debug!(session = %self.id, round = record.round, "round timed out")
            }
        }
        Ok(outcome)
    }

    pub fn advance(&self) -> Result<Phase, GameError> {
        let mut session = self.lock();
        let phase = session.advance().inspect_err(|err| {
            tracing::warn!(session = %self.id, error = %err, "advance rejected");
        })?;
        if phase == Phase::GameOver {
            let scores = session.scores();
            tracing::info!(
                session = %self.id,
                human = scores.human,
                ai = scores.ai,
                agreement = scores.agreement,
                "game over"
            );
        } else {
            tracing::debug!(session = %self.id, round = session.round_number(), "next round");
        }
        Ok(phase)
    }

    pub fn reset(&self) {
        let mut session = self.lock();
        let abandoned = session.phase();
        session.reset();
        tracing::info!(session = %self.id, from = ?abandoned, "session reset");
    }

    pub fn summary(&self) -> Result<GameSummary, GameError> {
        self.lock().summary()
    }

    pub fn history(&self) -> Vec<RoundRecord> {
        self.lock().history().to_vec()
    }

    pub fn view(&self) -> SessionView {
        let session = self.lock();
        SessionView {
            phase: session.phase(),
            round_number: session.round_number(),
            total_rounds: session.total_rounds(),
            scores: session.scores(),
            review: session.current_review().map(str::to_owned),
            remaining_secs: session.remaining_secs(),
            time_limit_secs: session.time_limit_secs(),
            last_result: session.last_result().cloned(),
        }
    }

    fn configure_locked(
        &self,
        session: &mut Session,
        dataset: Dataset,
        total_rounds: u32,
    ) -> Result<(), GameError> {
        let rows = dataset.len();
        match session.configure(dataset, total_rounds) {
            Ok(()) => {
                tracing::info!(
                    session = %self.id,
                    rows,
                    total_rounds,
                    time_limit_secs = ?session.time_limit_secs(),
                    "game started"
                );
                Ok(())
            }
            Err(err) => {
                tracing::warn!(session = %self.id, error = %err, "game not started");
                Err(err)
            }
        }
    }

    fn log_resolution(&self, result: &Result<RoundRecord, GameError>, trigger: &str) {
        match result {
            Ok(record) => tracing::debug!(
                session = %self.id,
                round = record.round,
                truth = %record.truth,
                human = %record.human,
                ai = %record.ai,
                polarity = record.ai_polarity,
                trigger,
                "round resolved"
            ),
            Err(err) => tracing::warn!(session = %self.id, error = %err, trigger, "answer rejected"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Barrier};
    use std::thread;
    use std::time::Duration;

    use sd_core::core::{DatasetItem, ManualClock, SessionPorts};

    use super::*;
    use crate::random::RngSource;

    fn make_controller() -> GameController {
        make_timed_controller(Arc::new(ManualClock::new()), None)
    }

    fn make_timed_controller(clock: Arc<ManualClock>, limit: Option<u64>) -> GameController {
        let session = Session::new(SessionPorts {
            clock,
            scorer: Arc::new(|_: &str| 0.5),
            random: Box::new(RngSource::seeded(3)),
        })
        .with_time_limit(limit);
        GameController::new(session)
    }

    fn dataset() -> Dataset {
        Dataset::new(vec![
            DatasetItem::new("Nice", "pos"),
            DatasetItem::new("Nasty", "neg"),
        ])
    }

    #[test]
    fn test_view_tracks_phase() {
        let controller = make_controller();
        assert_eq!(controller.view().phase, Phase::Setup);

        controller.start(dataset(), 5).unwrap();
        let view = controller.view();
        assert_eq!(view.phase, Phase::Active);
        assert_eq!(view.round_number, 1);
        assert!(view.review.is_some());
        assert!(view.last_result.is_none());

        controller.submit_answer(SentimentLabel::Positive).unwrap();
        let view = controller.view();
        assert_eq!(view.phase, Phase::Resolved);
        assert_eq!(view.last_result.unwrap().round, 1);
    }

    #[test]
    fn test_restart_from_middle_of_game() {
        let controller = make_controller();
        controller.start(dataset(), 5).unwrap();
        controller.submit_answer(SentimentLabel::Positive).unwrap();

        controller.restart(dataset(), 10).unwrap();
        let view = controller.view();
        assert_eq!(view.phase, Phase::Active);
        assert_eq!(view.total_rounds, 10);
        assert_eq!(view.scores, Scoreboard::default());
        assert!(controller.history().is_empty());
    }

    #[test]
    fn test_rejected_start_leaves_setup() {
        let controller = make_controller();
        assert!(controller.start(Dataset::default(), 5).is_err());
        assert_eq!(controller.view().phase, Phase::Setup);
    }

    #[test]
    fn test_concurrent_answers_resolve_once() {
        let controller = Arc::new(make_controller());
        controller.start(dataset(), 5).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let controller = Arc::clone(&controller);
                thread::spawn(move || controller.submit_answer(SentimentLabel::Neutral).is_ok())
            })
            .collect();
        let accepted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(accepted, 1);
        assert_eq!(controller.history().len(), 1);
    }

    #[test]
    fn test_skip_after_deadline_reports_timeout() {
        let clock = Arc::new(ManualClock::new());
        let controller = make_timed_controller(clock.clone(), Some(10));
        controller.start(dataset(), 5).unwrap();
        clock.advance(Duration::from_secs(11));

        let record = match controller.skip().unwrap() {
            SkipOutcome::Expired(record) => record,
            other => panic!("expected expiry, got {other:?}"),
        };
        assert!(record.timed_out());

        let view = controller.view();
        assert_eq!(view.phase, Phase::Resolved);
        assert_eq!(view.scores.human, 0);
        assert_eq!(view.scores.ai, u32::from(record.ai_correct));
        assert_eq!(view.last_result, Some(record));
        assert_eq!(controller.history().len(), 1);
    }

    #[test]
    fn test_skip_before_deadline() {
        let clock = Arc::new(ManualClock::new());
        let controller = make_timed_controller(clock.clone(), Some(10));
        controller.start(dataset(), 5).unwrap();
        clock.advance(Duration::from_secs(4));

        assert_eq!(controller.skip().unwrap(), SkipOutcome::Skipped);
        let view = controller.view();
        assert_eq!(view.phase, Phase::Active);
        assert_eq!(view.remaining_secs, Some(10));
        assert!(controller.history().is_empty());
    }

    #[test]
    fn test_concurrent_restarts_all_succeed() {
        let controller = Arc::new(make_controller());
        controller.start(dataset(), 5).unwrap();
        let barrier = Arc::new(Barrier::new(8));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let controller = Arc::clone(&controller);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    (0..50).all(|_| controller.restart(dataset(), 5).is_ok())
                })
            })
            .collect();

        assert!(handles.into_iter().all(|h| h.join().unwrap()));
        let view = controller.view();
        assert_eq!(view.phase, Phase::Active);
        assert_eq!(view.round_number, 1);
    }
}
