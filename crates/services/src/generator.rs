use rand::Rng;

use drill_core::model::{
    DISTRACTOR_COUNT, OPTION_COUNT, Operation, PracticeConfig, Problem, ProblemError, UpperBound,
};

use crate::error::GeneratorError;
use crate::random::{random_int, random_int_excluding};

/// Lowest cap for multiplication operands, so small bounds still get variety.
pub const MULTIPLIER_FLOOR: u32 = 5;

/// Highest cap for multiplication operands, keeping products to the times tables.
pub const MULTIPLIER_CEILING: u32 = 10;

/// Largest multiplication operand for a given bound.
///
/// `floor(sqrt(upper))` clamped to `[MULTIPLIER_FLOOR, MULTIPLIER_CEILING]`.
/// Below an upper bound of 25 the product can exceed the bound.
#[must_use]
pub fn multiplier_cap(upper_bound: UpperBound) -> u32 {
    upper_bound
        .value()
        .isqrt()
        .clamp(MULTIPLIER_FLOOR, MULTIPLIER_CEILING)
}

/// Produces the next problem of a session from the previous one and the configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProblemGenerator;

impl ProblemGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Generate a fresh problem.
    ///
    /// Each operand differs from the same operand of `previous` whenever its range
    /// allows more than one value. `None` means there is nothing to avoid repeating.
    ///
    /// # Errors
    ///
    /// Returns `GeneratorError::NoOperationEnabled` if the configuration enables nothing.
    /// Returns `GeneratorError::RangeExhausted` if the answer range cannot hold five distractors.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        previous: Option<&Problem>,
        config: &PracticeConfig,
        rng: &mut R,
    ) -> Result<Problem, GeneratorError> {
        let operation = pick_operation(config.enabled_operations(), rng)?;
        let upper = config.upper_bound().value();
        let prev_a = previous.map(Problem::operand_a);
        let prev_b = previous.map(Problem::operand_b);

        let (a, b) = match operation {
            Operation::Multiply => {
                let cap = multiplier_cap(config.upper_bound());
                let a = draw_operand(rng, 1, cap, prev_a)?;
                let b = draw_operand(rng, 1, cap, prev_b)?;
                (a, b)
            }
            Operation::Add => {
                // b's range shrinks with a so that a + b <= upper.
                let a = draw_operand(rng, 1, upper - 1, prev_a)?;
                let b = draw_operand(rng, 1, upper - a, prev_b)?;
                (a, b)
            }
            Operation::Subtract => {
                let min_a = (upper / 2).max(2);
                let a = draw_operand(rng, min_a, upper, prev_a)?;
                let b = draw_operand(rng, 1, a, prev_b)?;
                (a, b)
            }
        };

        let correct = operation
            .apply(a, b)
            .ok_or(ProblemError::InvalidResult { operation, a, b })?;
        let options = build_options(rng, correct, operation.min_answer(), upper)?;
        let problem = Problem::new(operation, a, b, options)?;

        log::debug!(
            "generated {} {} (options {:?})",
            problem.expression(),
            problem.correct_answer(),
            problem.options()
        );
        Ok(problem)
    }
}

fn pick_operation<R: Rng + ?Sized>(
    operations: &[Operation],
    rng: &mut R,
) -> Result<Operation, GeneratorError> {
    if operations.is_empty() {
        return Err(GeneratorError::NoOperationEnabled);
    }
    let index = rng.random_range(0..operations.len());
    Ok(operations[index])
}

fn draw_operand<R: Rng + ?Sized>(
    rng: &mut R,
    min: u32,
    max: u32,
    previous: Option<u32>,
) -> Result<u32, GeneratorError> {
    match previous {
        Some(prev) if min < max => random_int_excluding(rng, min, max, &[prev]),
        _ => random_int(rng, min, max),
    }
}

/// Five distinct distractors from `[min_answer, max_answer]` with the correct answer
/// inserted at a uniformly random slot.
fn build_options<R: Rng + ?Sized>(
    rng: &mut R,
    correct: u32,
    min_answer: u32,
    max_answer: u32,
) -> Result<Vec<u32>, GeneratorError> {
    let mut taken = Vec::with_capacity(OPTION_COUNT);
    taken.push(correct);
    let mut options = Vec::with_capacity(OPTION_COUNT);

    for _ in 0..DISTRACTOR_COUNT {
        let distractor = random_int_excluding(rng, min_answer, max_answer, &taken)?;
        taken.push(distractor);
        options.push(distractor);
    }

    let slot = rng.random_range(0..=options.len());
    options.insert(slot, correct);
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn multiplier_cap_is_clamped() {
        assert_eq!(multiplier_cap(UpperBound::new(10)), 5);
        assert_eq!(multiplier_cap(UpperBound::new(20)), 5);
        assert_eq!(multiplier_cap(UpperBound::new(49)), 7);
        assert_eq!(multiplier_cap(UpperBound::new(100)), 10);
        assert_eq!(multiplier_cap(UpperBound::new(100_000)), 10);
    }

    #[test]
    fn empty_operation_list_is_an_error() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            pick_operation(&[], &mut rng),
            Err(GeneratorError::NoOperationEnabled)
        );
    }

    #[test]
    fn operand_with_single_candidate_ignores_previous() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(draw_operand(&mut rng, 1, 1, Some(1)), Ok(1));
        for _ in 0..100 {
            assert_eq!(draw_operand(&mut rng, 1, 2, Some(1)), Ok(2));
        }
    }

    #[test]
    fn options_hold_correct_answer_once() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..200 {
            let options = build_options(&mut rng, 25, 1, 10).unwrap();
            assert_eq!(options.len(), OPTION_COUNT);
            assert_eq!(options.iter().filter(|&&v| v == 25).count(), 1);
            assert!(
                options
                    .iter()
                    .filter(|&&v| v != 25)
                    .all(|v| (1..=10).contains(v))
            );
        }
    }

    #[test]
    fn narrow_answer_range_fails_instead_of_hanging() {
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(
            build_options(&mut rng, 2, 0, 4),
            Err(GeneratorError::RangeExhausted { min: 0, max: 4 })
        );
    }

    #[test]
    fn first_problem_has_no_previous() {
        let config = PracticeConfig::new(&[Operation::Add], 100, 1).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let problem = ProblemGenerator::new()
            .generate(None, &config, &mut rng)
            .unwrap();
        assert_eq!(problem.operation(), Operation::Add);
        assert!(problem.correct_answer() <= 100);
    }
}
