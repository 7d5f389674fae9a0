#![forbid(unsafe_code)]

pub mod error;
pub mod generator;
pub mod random;
pub mod sessions;

pub use drill_core::Clock;

pub use error::{GeneratorError, SessionError};
pub use generator::{MULTIPLIER_CEILING, MULTIPLIER_FLOOR, ProblemGenerator, multiplier_cap};

pub use sessions::{
    AnswerOutcome, DEFAULT_COMPLETION_DELAY, PracticeAnswerResult, PracticeLoopService,
    PracticeSession, SessionProgress,
};
