use std::fmt;
use std::path::{Path, PathBuf};

use drill_core::model::{Operation, PracticeConfigDraft};
use serde::Deserialize;

/// Operations enabled when neither flags, config file nor environment pick any.
const DEFAULT_OPERATIONS: [Operation; 1] = [Operation::Add];

#[derive(Debug)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidNumber { name: &'static str, raw: String },
    InvalidOperation { raw: String },
    ConfigRead { path: PathBuf, source: std::io::Error },
    ConfigParse { path: PathBuf, source: serde_json::Error },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidNumber { name, raw } => write!(f, "invalid {name} value: {raw}"),
            ArgsError::InvalidOperation { raw } => write!(f, "invalid operation list: {raw}"),
            ArgsError::ConfigRead { path, source } => {
                write!(f, "cannot read {}: {source}", path.display())
            }
            ArgsError::ConfigParse { path, source } => {
                write!(f, "cannot parse {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ArgsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ArgsError::ConfigRead { source, .. } => Some(source),
            ArgsError::ConfigParse { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--ops <list>] [--upper <n>] [--rounds <n>] [--seed <n>] [--config <file.json>]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --ops <list>       Comma separated: add, sub, mul (default: add)");
    eprintln!("  --upper <n>        Upper bound, clamped to 10..=100000 (default: 100)");
    eprintln!("  --rounds <n>       Number of problems to solve (default: 10)");
    eprintln!("  --seed <n>         Seed for a reproducible session");
    eprintln!("  --config <file>    JSON file with operations, upper_bound, rounds, seed");
    eprintln!();
    eprintln!("Environment (lower precedence than the config file and flags):");
    eprintln!("  DRILL_OPERATIONS, DRILL_UPPER_BOUND, DRILL_ROUNDS, DRILL_SEED, DRILL_CONFIG");
    eprintln!();
    eprintln!("Logging: RUST_LOG=debug");
}

/// Resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub draft: PracticeConfigDraft,
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        let mut draft = PracticeConfigDraft::new();
        for op in DEFAULT_OPERATIONS {
            draft.set_operation(op, true);
        }
        Self { draft, seed: None }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Parsed {
    Help,
    Run(Settings),
}

/// One configuration layer. Fields left as `None` keep the lower layer's value.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct Overrides {
    operations: Option<Vec<Operation>>,
    upper_bound: Option<u32>,
    rounds: Option<u32>,
    seed: Option<u64>,
}

impl Overrides {
    fn apply(self, settings: &mut Settings) {
        if let Some(operations) = self.operations {
            for op in Operation::ALL {
                settings.draft.set_operation(op, operations.contains(&op));
            }
        }
        if let Some(upper_bound) = self.upper_bound {
            settings.draft.upper_bound = upper_bound;
        }
        if let Some(rounds) = self.rounds {
            settings.draft.rounds = rounds;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
    }

    fn from_env(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ArgsError> {
        Ok(Self {
            operations: lookup("DRILL_OPERATIONS")
                .map(|raw| parse_operations(&raw))
                .transpose()?,
            upper_bound: lookup("DRILL_UPPER_BOUND")
                .map(|raw| parse_number("DRILL_UPPER_BOUND", raw))
                .transpose()?,
            rounds: lookup("DRILL_ROUNDS")
                .map(|raw| parse_number("DRILL_ROUNDS", raw))
                .transpose()?,
            seed: lookup("DRILL_SEED")
                .map(|raw| parse_number("DRILL_SEED", raw))
                .transpose()?,
        })
    }

    fn from_file(path: &Path) -> Result<Self, ArgsError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ArgsError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ArgsError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_number<T: std::str::FromStr>(name: &'static str, raw: String) -> Result<T, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidNumber { name, raw })
}

fn parse_operations(raw: &str) -> Result<Vec<Operation>, ArgsError> {
    let operations = raw
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(str::parse)
        .collect::<Result<Vec<Operation>, _>>()
        .map_err(|_| ArgsError::InvalidOperation {
            raw: raw.to_string(),
        })?;
    if operations.is_empty() {
        return Err(ArgsError::InvalidOperation {
            raw: raw.to_string(),
        });
    }
    Ok(operations)
}

/// Layer defaults, environment, config file and flags, in rising precedence.
///
/// # Errors
///
/// Returns `ArgsError` for malformed flags, environment values or config files.
pub fn parse(
    args: impl IntoIterator<Item = String>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Parsed, ArgsError> {
    let mut args = args.into_iter();
    let mut flags = Overrides::default();
    let mut config_path = lookup("DRILL_CONFIG").map(PathBuf::from);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--ops" => {
                let value = require_value(&mut args, "--ops")?;
                flags.operations = Some(parse_operations(&value)?);
            }
            "--upper" => {
                let value = require_value(&mut args, "--upper")?;
                flags.upper_bound = Some(parse_number("--upper", value)?);
            }
            "--rounds" => {
                let value = require_value(&mut args, "--rounds")?;
                flags.rounds = Some(parse_number("--rounds", value)?);
            }
            "--seed" => {
                let value = require_value(&mut args, "--seed")?;
                flags.seed = Some(parse_number("--seed", value)?);
            }
            "--config" => {
                config_path = Some(PathBuf::from(require_value(&mut args, "--config")?));
            }
            "--help" | "-h" => return Ok(Parsed::Help),
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }

    let mut settings = Settings::default();
    Overrides::from_env(&lookup)?.apply(&mut settings);
    if let Some(path) = config_path {
        Overrides::from_file(&path)?.apply(&mut settings);
    }
    flags.apply(&mut settings);

    Ok(Parsed::Run(settings))
}
