use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;

use drill_core::Clock;
use drill_core::model::{PracticeConfig, Problem, SessionSummary};

use super::progress::SessionProgress;
use crate::error::SessionError;
use crate::generator::ProblemGenerator;

/// What happened after an answer was submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// Wrong choice; the same problem stays live.
    Incorrect,
    /// Correct; a new problem replaced the old one.
    Next,
    /// Correct, and it was the last round.
    Complete,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory practice session.
///
/// Owns the single live `Problem` and replaces it wholesale after each correct
/// answer until `rounds` problems have been solved.
pub struct PracticeSession {
    config: PracticeConfig,
    generator: ProblemGenerator,
    rng: StdRng,
    clock: Clock,
    current: Problem,
    completed: u32,
    mistakes: u32,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for PracticeSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticeSession")
            .field("config", &self.config)
            .field("current", &self.current)
            .field("completed", &self.completed)
            .field("mistakes", &self.mistakes)
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

impl PracticeSession {
    /// Start a session seeded from the thread-local generator.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Generator` if the first problem cannot be generated.
    pub fn start(config: PracticeConfig, clock: Clock) -> Result<Self, SessionError> {
        let rng = StdRng::from_rng(&mut rand::rng());
        Self::start_with_rng(config, clock, rng)
    }

    /// Start a session whose problems are reproducible for a given seed.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Generator` if the first problem cannot be generated.
    pub fn start_seeded(
        config: PracticeConfig,
        clock: Clock,
        seed: u64,
    ) -> Result<Self, SessionError> {
        Self::start_with_rng(config, clock, StdRng::seed_from_u64(seed))
    }

    fn start_with_rng(
        config: PracticeConfig,
        clock: Clock,
        mut rng: StdRng,
    ) -> Result<Self, SessionError> {
        let generator = ProblemGenerator::new();
        let current = generator.generate(None, &config, &mut rng)?;
        log::info!(
            "practice session started: {} rounds, operations {:?}, upper bound {}",
            config.rounds(),
            config.enabled_operations(),
            config.upper_bound().value()
        );

        Ok(Self {
            config,
            generator,
            rng,
            started_at: clock.now(),
            clock,
            current,
            completed: 0,
            mistakes: 0,
            completed_at: None,
        })
    }

    /// The problem awaiting an answer. After completion this is the last solved one.
    #[must_use]
    pub fn current_problem(&self) -> &Problem {
        &self.current
    }

    #[must_use]
    pub fn completed(&self) -> u32 {
        self.completed
    }

    #[must_use]
    pub fn mistakes(&self) -> u32 {
        self.mistakes
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed >= self.config.rounds()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.config.rounds();
        SessionProgress {
            total,
            completed: self.completed,
            remaining: total.saturating_sub(self.completed),
            is_complete: self.is_complete(),
        }
    }

    /// Submit a value for the current problem.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` if every round is already solved.
    /// Returns `SessionError::Generator` if the next problem cannot be generated;
    /// the session is left unchanged in that case.
    pub fn answer(&mut self, value: u32) -> Result<AnswerOutcome, SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }

        if !self.current.is_correct(value) {
            self.mistakes = self.mistakes.saturating_add(1);
            log::debug!("wrong answer {value} for {}", self.current.expression());
            return Ok(AnswerOutcome::Incorrect);
        }

        if self.completed + 1 >= self.config.rounds() {
            self.completed += 1;
            self.completed_at = Some(self.clock.now());
            log::info!(
                "practice session complete: {} rounds, {} mistakes",
                self.completed,
                self.mistakes
            );
            return Ok(AnswerOutcome::Complete);
        }

        let next = self
            .generator
            .generate(Some(&self.current), &self.config, &mut self.rng)?;
        self.current = next;
        self.completed += 1;
        Ok(AnswerOutcome::Next)
    }

    /// Submit the option at `index` (0-based) of the current problem.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidChoice` if `index` is out of range, otherwise
    /// the same errors as [`PracticeSession::answer`].
    pub fn answer_option(&mut self, index: usize) -> Result<AnswerOutcome, SessionError> {
        let value = *self
            .current
            .options()
            .get(index)
            .ok_or(SessionError::InvalidChoice(index))?;
        self.answer(value)
    }

    /// Build the summary of a finished session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InProgress` if rounds remain.
    pub fn summary(&self) -> Result<SessionSummary, SessionError> {
        let completed_at = self.completed_at.ok_or(SessionError::InProgress)?;
        Ok(SessionSummary::new(
            self.config.rounds(),
            self.mistakes,
            self.started_at,
            completed_at,
        )?)
    }
}
