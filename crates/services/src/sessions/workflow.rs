use std::time::Duration;

use drill_core::model::{PracticeConfig, SessionSummary};

use super::progress::SessionProgress;
use super::service::{AnswerOutcome, PracticeSession};
use crate::Clock;
use crate::error::SessionError;

/// Pause between the last correct answer and the completion callback.
pub const DEFAULT_COMPLETION_DELAY: Duration = Duration::from_millis(500);

/// Result of answering the current problem in a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PracticeAnswerResult {
    pub outcome: AnswerOutcome,
    pub progress: SessionProgress,
}

/// Orchestrates session start, answering and the delayed completion callback.
#[derive(Debug, Clone)]
pub struct PracticeLoopService {
    clock: Clock,
    completion_delay: Duration,
}

impl PracticeLoopService {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            completion_delay: DEFAULT_COMPLETION_DELAY,
        }
    }

    #[must_use]
    pub fn with_completion_delay(mut self, delay: Duration) -> Self {
        self.completion_delay = delay;
        self
    }

    /// Start a new session for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the first problem cannot be generated.
    pub fn start_session(&self, config: PracticeConfig) -> Result<PracticeSession, SessionError> {
        PracticeSession::start(config, self.clock)
    }

    /// Start a reproducible session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the first problem cannot be generated.
    pub fn start_session_seeded(
        &self,
        config: PracticeConfig,
        seed: u64,
    ) -> Result<PracticeSession, SessionError> {
        PracticeSession::start_seeded(config, self.clock, seed)
    }

    /// Answer the current problem.
    ///
    /// When this answer finishes the session, waits for the completion delay and
    /// then hands the summary to `on_complete`. A session completes once, and
    /// answering it afterwards fails, so `on_complete` runs at most once per session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` if the session was already finished.
    /// Returns `SessionError::Generator` if the next problem cannot be generated.
    pub async fn answer_current<F>(
        &self,
        session: &mut PracticeSession,
        value: u32,
        on_complete: F,
    ) -> Result<PracticeAnswerResult, SessionError>
    where
        F: FnOnce(&SessionSummary),
    {
        let outcome = session.answer(value)?;

        if outcome == AnswerOutcome::Complete {
            let summary = session.summary()?;
            tokio::time::sleep(self.completion_delay).await;
            on_complete(&summary);
        }

        Ok(PracticeAnswerResult {
            outcome,
            progress: session.progress(),
        })
    }
}
