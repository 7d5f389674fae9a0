use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::Operation;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("at least one operation must be enabled")]
    NoOperationEnabled,

    #[error("rounds must be >= 1, got {0}")]
    InvalidRounds(u32),
}

//
// ─── UPPER BOUND ──────────────────────────────────────────────────────────────
//

/// Smallest upper bound a session may use.
pub const MIN_UPPER_BOUND: u32 = 10;

/// Largest upper bound a session may use.
pub const MAX_UPPER_BOUND: u32 = 100_000;

/// Inclusive ceiling for generated operands and answers.
///
/// Values outside `[MIN_UPPER_BOUND, MAX_UPPER_BOUND]` are clamped rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct UpperBound(u32);

impl UpperBound {
    #[must_use]
    pub fn new(value: u32) -> Self {
        Self(value.clamp(MIN_UPPER_BOUND, MAX_UPPER_BOUND))
    }

    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for UpperBound {
    fn default() -> Self {
        Self(100)
    }
}

impl From<u32> for UpperBound {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl From<UpperBound> for u32 {
    fn from(value: UpperBound) -> Self {
        value.0
    }
}

//
// ─── DRAFT ────────────────────────────────────────────────────────────────────
//

/// Mutable form state collected before a session starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PracticeConfigDraft {
    pub addition: bool,
    pub subtraction: bool,
    pub multiplication: bool,
    pub upper_bound: u32,
    pub rounds: u32,
}

impl Default for PracticeConfigDraft {
    fn default() -> Self {
        Self {
            addition: false,
            subtraction: false,
            multiplication: false,
            upper_bound: UpperBound::default().value(),
            rounds: 10,
        }
    }
}

impl PracticeConfigDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle a single operation on or off.
    pub fn set_operation(&mut self, operation: Operation, enabled: bool) {
        match operation {
            Operation::Add => self.addition = enabled,
            Operation::Subtract => self.subtraction = enabled,
            Operation::Multiply => self.multiplication = enabled,
        }
    }

    /// Validate and normalize the draft into an immutable session configuration.
    ///
    /// The upper bound is clamped silently.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoOperationEnabled` if every operation is off.
    /// Returns `ConfigError::InvalidRounds` if `rounds` is zero.
    pub fn validate(self) -> Result<PracticeConfig, ConfigError> {
        let operations: Vec<Operation> = Operation::ALL
            .into_iter()
            .filter(|op| match op {
                Operation::Add => self.addition,
                Operation::Subtract => self.subtraction,
                Operation::Multiply => self.multiplication,
            })
            .collect();

        if operations.is_empty() {
            return Err(ConfigError::NoOperationEnabled);
        }
        if self.rounds == 0 {
            return Err(ConfigError::InvalidRounds(self.rounds));
        }

        Ok(PracticeConfig {
            operations,
            upper_bound: UpperBound::new(self.upper_bound),
            rounds: self.rounds,
        })
    }
}

//
// ─── CONFIG ───────────────────────────────────────────────────────────────────
//

/// Immutable per-session configuration.
///
/// Always has at least one operation enabled and at least one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PracticeConfigDraft", into = "PracticeConfigDraft")]
pub struct PracticeConfig {
    operations: Vec<Operation>,
    upper_bound: UpperBound,
    rounds: u32,
}

impl PracticeConfig {
    /// Build a configuration from a list of operations.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` under the same rules as `PracticeConfigDraft::validate`.
    pub fn new(
        operations: &[Operation],
        upper_bound: u32,
        rounds: u32,
    ) -> Result<Self, ConfigError> {
        let mut draft = PracticeConfigDraft {
            upper_bound,
            rounds,
            ..PracticeConfigDraft::default()
        };
        for op in operations {
            draft.set_operation(*op, true);
        }
        draft.validate()
    }

    /// Enabled operations in `Add`, `Subtract`, `Multiply` order.
    #[must_use]
    pub fn enabled_operations(&self) -> &[Operation] {
        &self.operations
    }

    #[must_use]
    pub fn is_enabled(&self, operation: Operation) -> bool {
        self.operations.contains(&operation)
    }

    #[must_use]
    pub fn upper_bound(&self) -> UpperBound {
        self.upper_bound
    }

    #[must_use]
    pub fn rounds(&self) -> u32 {
        self.rounds
    }
}

impl TryFrom<PracticeConfigDraft> for PracticeConfig {
    type Error = ConfigError;

    fn try_from(draft: PracticeConfigDraft) -> Result<Self, Self::Error> {
        draft.validate()
    }
}

impl From<PracticeConfig> for PracticeConfigDraft {
    fn from(config: PracticeConfig) -> Self {
        Self {
            addition: config.is_enabled(Operation::Add),
            subtraction: config.is_enabled(Operation::Subtract),
            multiplication: config.is_enabled(Operation::Multiply),
            upper_bound: config.upper_bound.value(),
            rounds: config.rounds,
        }
    }
}
