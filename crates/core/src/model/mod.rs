mod config;
mod operation;
mod problem;
mod session;

pub use config::{
    ConfigError, MAX_UPPER_BOUND, MIN_UPPER_BOUND, PracticeConfig, PracticeConfigDraft,
    UpperBound,
};
pub use operation::{Operation, ParseOperationError};
pub use problem::{DISTRACTOR_COUNT, OPTION_COUNT, Problem, ProblemError};
pub use session::{SessionSummary, SessionSummaryError};
