use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown operation: {0}")]
pub struct ParseOperationError(pub String);

/// Arithmetic operation a practice problem asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
}

impl Operation {
    /// All operations in their canonical order.
    pub const ALL: [Operation; 3] = [Operation::Add, Operation::Subtract, Operation::Multiply];

    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Multiply => "×",
        }
    }

    /// Applies the operation to two operands.
    ///
    /// Returns `None` when the result does not fit in a non-negative `u32`.
    #[must_use]
    pub fn apply(self, a: u32, b: u32) -> Option<u32> {
        match self {
            Operation::Add => a.checked_add(b),
            Operation::Subtract => a.checked_sub(b),
            Operation::Multiply => a.checked_mul(b),
        }
    }

    /// Smallest value an answer option may take for this operation.
    ///
    /// Addition operands start at 1, so sums start at 2; subtraction may reach 0.
    #[must_use]
    pub fn min_answer(self) -> u32 {
        match self {
            Operation::Add => 2,
            Operation::Subtract => 0,
            Operation::Multiply => 1,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operation {
    type Err = ParseOperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "add" | "+" | "addition" => Ok(Operation::Add),
            "sub" | "-" | "subtract" | "subtraction" => Ok(Operation::Subtract),
            "mul" | "x" | "*" | "×" | "multiply" | "multiplication" => Ok(Operation::Multiply),
            _ => Err(ParseOperationError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_rejects_negative_subtraction() {
        assert_eq!(Operation::Subtract.apply(3, 5), None);
        assert_eq!(Operation::Subtract.apply(5, 5), Some(0));
        assert_eq!(Operation::Multiply.apply(7, 8), Some(56));
    }

    #[test]
    fn min_answer_per_operation() {
        assert_eq!(Operation::Add.min_answer(), 2);
        assert_eq!(Operation::Subtract.min_answer(), 0);
        assert_eq!(Operation::Multiply.min_answer(), 1);
    }

    #[test]
    fn parses_aliases() {
        assert_eq!("+".parse::<Operation>().unwrap(), Operation::Add);
        assert_eq!(" Sub ".parse::<Operation>().unwrap(), Operation::Subtract);
        assert_eq!("×".parse::<Operation>().unwrap(), Operation::Multiply);
        assert!("divide".parse::<Operation>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&Operation::Multiply).unwrap();
        assert_eq!(json, "\"multiply\"");
    }
}
