use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionSummaryError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,
}

/// Outcome of a finished practice session. Held in memory only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    total_rounds: u32,
    mistakes: u32,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
}

impl SessionSummary {
    /// # Errors
    ///
    /// Returns `SessionSummaryError::InvalidTimeRange` if `completed_at` is before `started_at`.
    pub fn new(
        total_rounds: u32,
        mistakes: u32,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, SessionSummaryError> {
        if completed_at < started_at {
            return Err(SessionSummaryError::InvalidTimeRange);
        }
        Ok(Self {
            total_rounds,
            mistakes,
            started_at,
            completed_at,
        })
    }

    #[must_use]
    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    /// Wrong selections made before the correct answer was found.
    #[must_use]
    pub fn mistakes(&self) -> u32 {
        self.mistakes
    }

    /// Share of selections that were correct, in `[0, 1]`.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        let attempts = self.total_rounds.saturating_add(self.mistakes);
        if attempts == 0 {
            return 1.0;
        }
        f64::from(self.total_rounds) / f64::from(attempts)
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn duration(&self) -> chrono::Duration {
        self.completed_at - self.started_at
    }
}
