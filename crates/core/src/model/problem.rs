use std::collections::HashSet;
use thiserror::Error;

use crate::model::Operation;

/// Number of choices shown for each problem.
pub const OPTION_COUNT: usize = 6;

/// Number of incorrect choices shown next to the correct answer.
pub const DISTRACTOR_COUNT: usize = OPTION_COUNT - 1;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProblemError {
    #[error("{operation} of {a} and {b} has no non-negative result")]
    InvalidResult { operation: Operation, a: u32, b: u32 },

    #[error("expected 6 options, got {len}")]
    OptionCount { len: usize },

    #[error("option {0} appears more than once")]
    DuplicateOption(u32),

    #[error("correct answer {0} is missing from the options")]
    MissingAnswer(u32),
}

//
// ─── PROBLEM ──────────────────────────────────────────────────────────────────
//

/// A fully formed multiple-choice arithmetic problem.
///
/// Built once per round and never mutated afterwards. The correct answer is always
/// derived from the operands, and the options hold it exactly once among distinct values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    operand_a: u32,
    operand_b: u32,
    operation: Operation,
    correct_answer: u32,
    options: [u32; OPTION_COUNT],
}

impl Problem {
    /// Creates a problem, deriving the correct answer from the operands.
    ///
    /// # Errors
    ///
    /// Returns `ProblemError::InvalidResult` if the result would be negative or overflow.
    /// Returns `ProblemError::OptionCount` unless exactly `OPTION_COUNT` options are given.
    /// Returns `ProblemError::DuplicateOption` if any option repeats.
    /// Returns `ProblemError::MissingAnswer` if the correct answer is not among the options.
    pub fn new(
        operation: Operation,
        operand_a: u32,
        operand_b: u32,
        options: Vec<u32>,
    ) -> Result<Self, ProblemError> {
        let correct_answer =
            operation
                .apply(operand_a, operand_b)
                .ok_or(ProblemError::InvalidResult {
                    operation,
                    a: operand_a,
                    b: operand_b,
                })?;

        let len = options.len();
        let options: [u32; OPTION_COUNT] = options
            .try_into()
            .map_err(|_| ProblemError::OptionCount { len })?;

        let mut seen = HashSet::with_capacity(OPTION_COUNT);
        for value in options {
            if !seen.insert(value) {
                return Err(ProblemError::DuplicateOption(value));
            }
        }
        if !seen.contains(&correct_answer) {
            return Err(ProblemError::MissingAnswer(correct_answer));
        }

        Ok(Self {
            operand_a,
            operand_b,
            operation,
            correct_answer,
            options,
        })
    }

    #[must_use]
    pub fn operand_a(&self) -> u32 {
        self.operand_a
    }

    #[must_use]
    pub fn operand_b(&self) -> u32 {
        self.operand_b
    }

    #[must_use]
    pub fn operation(&self) -> Operation {
        self.operation
    }

    #[must_use]
    pub fn correct_answer(&self) -> u32 {
        self.correct_answer
    }

    #[must_use]
    pub fn options(&self) -> &[u32; OPTION_COUNT] {
        &self.options
    }

    #[must_use]
    pub fn is_correct(&self, value: u32) -> bool {
        value == self.correct_answer
    }

    /// Index of the correct answer within `options`.
    #[must_use]
    pub fn position_of_answer(&self) -> usize {
        self.options
            .iter()
            .position(|&v| v == self.correct_answer)
            .unwrap_or_default()
    }

    /// Prompt text, e.g. `37 + 58 =`.
    #[must_use]
    pub fn expression(&self) -> String {
        format!(
            "{} {} {} =",
            self.operand_a,
            self.operation.symbol(),
            self.operand_b
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_answer_and_locates_it() {
        let problem =
            Problem::new(Operation::Add, 37, 58, vec![12, 95, 40, 7, 66, 81]).unwrap();
        assert_eq!(problem.correct_answer(), 95);
        assert_eq!(problem.position_of_answer(), 1);
        assert!(problem.is_correct(95));
        assert!(!problem.is_correct(94));
        assert_eq!(problem.expression(), "37 + 58 =");
    }

    #[test]
    fn rejects_bad_option_sets() {
        assert_eq!(
            Problem::new(Operation::Add, 1, 2, vec![3, 4, 5]),
            Err(ProblemError::OptionCount { len: 3 })
        );
        assert_eq!(
            Problem::new(Operation::Add, 1, 2, vec![3, 4, 5, 6, 7, 4]),
            Err(ProblemError::DuplicateOption(4))
        );
        assert_eq!(
            Problem::new(Operation::Multiply, 3, 3, vec![1, 2, 3, 4, 5, 6]),
            Err(ProblemError::MissingAnswer(9))
        );
    }

    #[test]
    fn rejects_negative_difference() {
        assert!(matches!(
            Problem::new(Operation::Subtract, 2, 5, vec![0, 1, 2, 3, 4, 5]),
            Err(ProblemError::InvalidResult { .. })
        ));
    }
}
