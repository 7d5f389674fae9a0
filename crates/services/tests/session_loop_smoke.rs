use std::cell::Cell;
use std::time::Duration;

use drill_core::model::{Operation, PracticeConfig, SessionSummary};
use drill_core::time::fixed_clock;
use services::{AnswerOutcome, PracticeLoopService, SessionError};

fn loop_service() -> PracticeLoopService {
    PracticeLoopService::new(fixed_clock())
}

#[tokio::test(start_paused = true)]
async fn completion_fires_once_after_last_round() {
    let config = PracticeConfig::new(&[Operation::Add, Operation::Subtract], 100, 3).unwrap();
    let loop_svc = loop_service();
    let mut session = loop_svc.start_session_seeded(config, 99).unwrap();
    let fired = Cell::new(0_u32);

    for round in 1..=3 {
        let correct = session.current_problem().correct_answer();
        let result = loop_svc
            .answer_current(&mut session, correct, |summary: &SessionSummary| {
                assert_eq!(summary.total_rounds(), 3);
                fired.set(fired.get() + 1);
            })
            .await
            .unwrap();

        assert_eq!(result.progress.completed, round);
        if round < 3 {
            assert_eq!(result.outcome, AnswerOutcome::Next);
            assert_eq!(fired.get(), 0);
        } else {
            assert_eq!(result.outcome, AnswerOutcome::Complete);
        }
    }
    assert_eq!(fired.get(), 1);

    let err = loop_svc
        .answer_current(&mut session, 0, |_| fired.set(fired.get() + 1))
        .await;
    assert!(matches!(err, Err(SessionError::Completed)));
    assert_eq!(fired.get(), 1);
}

#[tokio::test(start_paused = true)]
async fn completion_waits_for_the_delay() {
    let config = PracticeConfig::new(&[Operation::Multiply], 100, 1).unwrap();
    let loop_svc = loop_service().with_completion_delay(Duration::from_millis(500));
    let mut session = loop_svc.start_session_seeded(config, 1).unwrap();
    let correct = session.current_problem().correct_answer();

    let started = tokio::time::Instant::now();
    loop_svc
        .answer_current(&mut session, correct, |_| {})
        .await
        .unwrap();
    assert!(started.elapsed() >= Duration::from_millis(500));
}

#[tokio::test]
async fn wrong_answers_are_counted_in_summary() {
    let config = PracticeConfig::new(&[Operation::Add], 20, 1).unwrap();
    let loop_svc = loop_service().with_completion_delay(Duration::ZERO);
    let mut session = loop_svc.start_session_seeded(config, 5).unwrap();
    let problem = session.current_problem().clone();
    let wrong = problem
        .options()
        .iter()
        .copied()
        .find(|v| !problem.is_correct(*v))
        .unwrap();

    let result = loop_svc
        .answer_current(&mut session, wrong, |_| panic!("not complete yet"))
        .await
        .unwrap();
    assert_eq!(result.outcome, AnswerOutcome::Incorrect);
    assert_eq!(result.progress.completed, 0);

    let mut mistakes = None;
    loop_svc
        .answer_current(&mut session, problem.correct_answer(), |summary| {
            mistakes = Some(summary.mistakes());
        })
        .await
        .unwrap();
    assert_eq!(mistakes, Some(1));
}
