use std::sync::Arc;

use k53_core::model::SessionMode;
use k53_core::session::{MOCK_DURATION_SECS, Phase, Transition};
use k53_core::time::fixed_clock;
use services::{NullSoundPlayer, QuizLoopService};
use storage::repository::Storage;
use storage::seed::seed_default_bank;

fn build_service(storage: &Storage) -> QuizLoopService {
    QuizLoopService::new(
        fixed_clock(),
        Arc::clone(&storage.questions),
        Arc::clone(&storage.preferences),
        Arc::new(NullSoundPlayer),
    )
}

#[tokio::test]
async fn mock_run_through_the_seeded_bank_produces_a_report() {
    let storage = Storage::in_memory();
    seed_default_bank(&storage).await.unwrap();
    let service = build_service(&storage);

    let mut session = service.start(SessionMode::Mock).await.unwrap();
    let total = session.total();
    assert!(total > 0);
    assert_eq!(session.remaining_secs(), Some(MOCK_DURATION_SECS));

    // answer every question with its correct option
    let mut report = None;
    for position in 0..total {
        session.jump(position);
        let correct = session.current_question().correct_option();
        let transition = service.select_answer(&mut session, correct).await;
        assert!(matches!(transition, Transition::Revealed { correct: true, .. }));
        match service.advance(&mut session) {
            Transition::Finished(r) => report = Some(r),
            Transition::Moved { .. } => {}
            other => panic!("unexpected transition: {other:?}"),
        }
    }

    let report = report.expect("last advance completes the session");
    assert_eq!(report.correct(), total);
    assert_eq!(report.score(), 100);
    assert!(report.passed());
    assert!(!report.time_expired());
}

#[tokio::test]
async fn early_finish_requires_confirmation_and_scores_blanks_as_wrong() {
    let storage = Storage::in_memory();
    seed_default_bank(&storage).await.unwrap();
    let service = build_service(&storage);

    let mut session = service.start(SessionMode::Quick).await.unwrap();
    let correct = session.current_question().correct_option();
    service.select_answer(&mut session, correct).await;

    let transition = service.request_finish(&mut session);
    let Transition::ConfirmRequired { unanswered } = transition else {
        panic!("expected confirmation, got {transition:?}");
    };
    assert_eq!(unanswered, session.total() - 1);
    assert_eq!(session.phase(), Phase::ConfirmFinish);

    let Transition::Finished(report) = service.confirm_finish(&mut session) else {
        panic!("expected completion");
    };
    assert_eq!(report.correct(), 1);
    assert_eq!(report.unanswered(), session.total() - 1);
}

#[tokio::test]
async fn expiry_finishes_a_mock_session_without_confirmation() {
    let storage = Storage::in_memory();
    seed_default_bank(&storage).await.unwrap();
    let service = build_service(&storage);

    let mut session = service.start(SessionMode::Mock).await.unwrap();
    let correct = session.current_question().correct_option();
    service.select_answer(&mut session, correct).await;

    let mut report = None;
    for _ in 0..MOCK_DURATION_SECS {
        if let Transition::Finished(r) = service.tick(&mut session) {
            report = Some(r);
        }
    }

    let report = report.expect("countdown reached zero");
    assert!(report.time_expired());
    assert_eq!(report.correct(), 1);
    assert!(session.is_finished());

    // dangling ticks after completion are inert
    assert_eq!(service.tick(&mut session), Transition::Ignored);
}
