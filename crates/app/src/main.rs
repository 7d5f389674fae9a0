mod args;

use drill_core::model::{PracticeConfig, Problem, SessionSummary};
use services::{AnswerOutcome, Clock, PracticeLoopService, PracticeSession, SessionProgress};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use args::{Parsed, print_usage};

const PROGRESS_WIDTH: usize = 20;

fn render_progress(progress: &SessionProgress) -> String {
    let filled = (progress.fraction() * PROGRESS_WIDTH as f64).round() as usize;
    let filled = filled.min(PROGRESS_WIDTH);
    format!(
        "[{}{}] {}/{}",
        "#".repeat(filled),
        ".".repeat(PROGRESS_WIDTH - filled),
        progress.completed,
        progress.total
    )
}

fn render_problem(problem: &Problem) -> String {
    let options = problem
        .options()
        .iter()
        .enumerate()
        .map(|(i, value)| format!("{}) {value}", i + 1))
        .collect::<Vec<_>>()
        .join("   ");
    format!("{}\n  {options}", problem.expression())
}

fn render_summary(summary: &SessionSummary) -> String {
    format!(
        "Done! {} problems, {} wrong picks, {:.0}% accuracy, {}s.",
        summary.total_rounds(),
        summary.mistakes(),
        summary.accuracy() * 100.0,
        summary.duration().num_seconds()
    )
}

/// Maps a 1-based menu choice to a 0-based option index.
fn parse_choice(line: &str, count: usize) -> Option<usize> {
    let choice: usize = line.trim().parse().ok()?;
    (1..=count).contains(&choice).then(|| choice - 1)
}

async fn play(
    loop_svc: &PracticeLoopService,
    session: &mut PracticeSession,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while !session.is_complete() {
        let prompt = format!(
            "\n{}\n{}\n> ",
            render_progress(&session.progress()),
            render_problem(session.current_problem())
        );
        stdout.write_all(prompt.as_bytes()).await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            log::info!("input closed before the session finished");
            println!();
            return Ok(());
        };

        let options = session.current_problem().options();
        let Some(index) = parse_choice(&line, options.len()) else {
            println!("Pick a number from 1 to {}.", options.len());
            continue;
        };
        let value = options[index];

        let result = loop_svc
            .answer_current(session, value, |summary| {
                println!("{}", render_summary(summary));
            })
            .await?;

        match result.outcome {
            AnswerOutcome::Incorrect => println!("Not {value}. Try again."),
            AnswerOutcome::Next => println!("Correct!"),
            AnswerOutcome::Complete => {}
        }
    }

    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let parsed = args::parse(std::env::args().skip(1), |key| std::env::var(key).ok())
        .map_err(|e| {
            eprintln!("{e}");
            print_usage();
            e
        })?;

    let settings = match parsed {
        Parsed::Help => {
            print_usage();
            return Ok(());
        }
        Parsed::Run(settings) => settings,
    };

    let config: PracticeConfig = settings.draft.validate()?;
    let loop_svc = PracticeLoopService::new(Clock::default_clock());
    let mut session = match settings.seed {
        Some(seed) => loop_svc.start_session_seeded(config, seed)?,
        None => loop_svc.start_session(config)?,
    };

    play(&loop_svc, &mut session).await
}

#[tokio::main]
async fn main() {
    pretty_env_logger::init();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drill_core::model::Operation;

    #[test]
    fn choice_must_be_in_menu_range() {
        assert_eq!(parse_choice(" 3 \n", 6), Some(2));
        assert_eq!(parse_choice("0", 6), None);
        assert_eq!(parse_choice("7", 6), None);
        assert_eq!(parse_choice("abc", 6), None);
    }

    #[test]
    fn progress_bar_fills_proportionally() {
        let progress = SessionProgress {
            total: 4,
            completed: 1,
            remaining: 3,
            is_complete: false,
        };
        assert_eq!(render_progress(&progress), "[#####...............] 1/4");
    }

    #[test]
    fn problem_lists_numbered_options() {
        let problem = Problem::new(Operation::Multiply, 3, 4, vec![5, 12, 7, 9, 1, 2]).unwrap();
        assert_eq!(
            render_problem(&problem),
            "3 × 4 =\n  1) 5   2) 12   3) 7   4) 9   5) 1   6) 2"
        );
    }
}
