use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{Question, SessionMode, TestReport};

/// Mock theory test duration: 57 minutes.
pub const MOCK_DURATION_SECS: u32 = 3_420;

/// How long a revealed answer stays on screen before the session advances on
/// its own. The machine only validates the token; the caller schedules the
/// delay.
pub const AUTO_ADVANCE_DELAY_MS: u64 = 1_200;

/// Number of questions drawn for a quick practice round.
pub const QUICK_PRACTICE_SIZE: usize = 10;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available for session")]
    Empty,
}

/// Where the session currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the user to pick an option (or navigate).
    Answering,
    /// The current question's correctness and explanation are shown.
    Revealed,
    /// Finish was requested with unanswered slots; waiting for confirmation.
    ConfirmFinish,
    /// A report has been produced; the machine accepts no further input.
    Finished,
}

/// Severity band of the remaining mock-test time, for presentation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerBand {
    /// More than 70% of the time remains.
    Comfortable,
    /// Between 30% and 70% remains.
    Steady,
    /// Less than 30% remains.
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Countdown {
    total: u32,
    remaining: u32,
}

impl Countdown {
    fn new(total: u32) -> Self {
        Self {
            total,
            remaining: total,
        }
    }

    fn band(&self) -> TimerBand {
        let percent = u64::from(self.remaining) * 100 / u64::from(self.total.max(1));
        if percent > 70 {
            TimerBand::Comfortable
        } else if percent > 30 {
            TimerBand::Steady
        } else {
            TimerBand::Critical
        }
    }
}

/// Handle minted by a reveal; only the most recent one is honored by
/// [`QuizSession::auto_advance`], so a stale scheduled advance cannot fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceToken(u32);

/// Result of applying one event to the session.
///
/// Malformed input (out-of-range option or jump target, an operation invalid
/// in the current phase) comes back as `Ignored`: the machine never errors on
/// user-triggered events.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// The event was rejected; nothing changed.
    Ignored,
    /// A selection was recorded and the question revealed.
    Revealed { correct: bool, token: AdvanceToken },
    /// The position changed (next, jump, or skip).
    Moved { position: usize },
    /// Finish was requested with unanswered slots.
    ConfirmRequired { unanswered: usize },
    /// Finish confirmation was cancelled; back to answering.
    Resumed,
    /// One second of mock-test time elapsed.
    Ticked { remaining: u32, band: TimerBand },
    /// The session is over; the report is the hand-off payload.
    Finished(TestReport),
}

/// The quiz session state machine.
///
/// Owns the question sequence, the answer slots, the reveal flag, and (in
/// mock mode) the countdown. All timing is fed in as events (`tick`,
/// token-guarded `auto_advance`) so the machine carries no timer or platform
/// dependency.
#[derive(Debug)]
pub struct QuizSession {
    mode: SessionMode,
    questions: Vec<Question>,
    answers: Vec<Option<usize>>,
    position: usize,
    phase: Phase,
    countdown: Option<Countdown>,
    reveal_generation: u32,
    started_at: DateTime<Utc>,
    report: Option<TestReport>,
}

impl QuizSession {
    /// Create a session over a fixed question sequence. Mock mode arms the
    /// countdown immediately; the sequence never changes afterwards.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if no questions are provided.
    pub fn new(
        questions: Vec<Question>,
        mode: SessionMode,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::Empty);
        }
        let answers = vec![None; questions.len()];
        let countdown = mode.is_timed().then(|| Countdown::new(MOCK_DURATION_SECS));
        Ok(Self {
            mode,
            questions,
            answers,
            position: 0,
            phase: Phase::Answering,
            countdown,
            reveal_generation: 0,
            started_at,
            report: None,
        })
    }

    //
    // ─── TRANSITIONS ───────────────────────────────────────────────────────────
    //

    /// Record a selection for the current question and reveal it.
    ///
    /// Rejected while revealed, confirming, or finished, and for an
    /// out-of-range option index. Overwrites any earlier selection for this
    /// position.
    pub fn select_answer(&mut self, option: usize) -> Transition {
        if self.phase != Phase::Answering {
            return Transition::Ignored;
        }
        let question = &self.questions[self.position];
        if option >= question.option_count() {
            return Transition::Ignored;
        }

        self.answers[self.position] = Some(option);
        self.phase = Phase::Revealed;
        self.reveal_generation = self.reveal_generation.wrapping_add(1);
        Transition::Revealed {
            correct: question.is_correct(option),
            token: AdvanceToken(self.reveal_generation),
        }
    }

    /// Advance past a revealed question. At the last position this enters the
    /// completion path instead.
    pub fn next(&mut self, now: DateTime<Utc>) -> Transition {
        if self.phase != Phase::Revealed {
            return Transition::Ignored;
        }
        if self.position + 1 < self.questions.len() {
            self.position += 1;
            self.phase = Phase::Answering;
            Transition::Moved {
                position: self.position,
            }
        } else {
            self.finish_or_confirm(now)
        }
    }

    /// The scheduled advance after a reveal. Honored only for the token from
    /// the most recent reveal while that reveal is still showing, so a
    /// doubly-scheduled or superseded advance is a no-op.
    pub fn auto_advance(&mut self, token: AdvanceToken, now: DateTime<Utc>) -> Transition {
        if self.phase != Phase::Revealed || token != AdvanceToken(self.reveal_generation) {
            return Transition::Ignored;
        }
        self.next(now)
    }

    /// Move straight to a question. Restores that slot's recorded answer and
    /// clears the reveal flag; the navigator grid and previous/next controls
    /// all land here. Jumping out of a pending finish confirmation cancels it.
    pub fn jump(&mut self, target: usize) -> Transition {
        if self.phase == Phase::Finished || target >= self.questions.len() {
            return Transition::Ignored;
        }
        self.position = target;
        self.phase = Phase::Answering;
        Transition::Moved {
            position: self.position,
        }
    }

    /// Advance without recording a selection. Only valid while the current
    /// question is unanswered and not the last one.
    pub fn skip(&mut self) -> Transition {
        if self.phase != Phase::Answering
            || self.answers[self.position].is_some()
            || self.position + 1 >= self.questions.len()
        {
            return Transition::Ignored;
        }
        self.position += 1;
        Transition::Moved {
            position: self.position,
        }
    }

    /// Ask to finish. With unanswered slots this requires confirmation;
    /// otherwise the session completes immediately.
    pub fn request_finish(&mut self, now: DateTime<Utc>) -> Transition {
        match self.phase {
            Phase::Answering | Phase::Revealed => self.finish_or_confirm(now),
            Phase::ConfirmFinish | Phase::Finished => Transition::Ignored,
        }
    }

    /// Confirm a pending finish; unanswered slots are scored as incorrect.
    pub fn confirm_finish(&mut self, now: DateTime<Utc>) -> Transition {
        if self.phase != Phase::ConfirmFinish {
            return Transition::Ignored;
        }
        self.finish(now, false)
    }

    /// Abandon a pending finish and return to answering.
    pub fn cancel_finish(&mut self) -> Transition {
        if self.phase != Phase::ConfirmFinish {
            return Transition::Ignored;
        }
        self.phase = Phase::Answering;
        Transition::Resumed
    }

    /// One second of mock-test time. Clamped at zero; reaching zero completes
    /// the session exactly once, bypassing any pending confirmation.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Transition {
        if self.phase == Phase::Finished {
            return Transition::Ignored;
        }
        let Some(countdown) = self.countdown.as_mut() else {
            return Transition::Ignored;
        };
        countdown.remaining = countdown.remaining.saturating_sub(1);
        let remaining = countdown.remaining;
        let band = countdown.band();
        if remaining == 0 {
            return self.finish(now, true);
        }
        Transition::Ticked { remaining, band }
    }

    fn finish_or_confirm(&mut self, now: DateTime<Utc>) -> Transition {
        let unanswered = self.unanswered_count();
        if unanswered > 0 {
            self.phase = Phase::ConfirmFinish;
            Transition::ConfirmRequired { unanswered }
        } else {
            self.finish(now, false)
        }
    }

    fn finish(&mut self, now: DateTime<Utc>, time_expired: bool) -> Transition {
        self.phase = Phase::Finished;
        self.countdown = None;
        let completed_at = now.max(self.started_at);
        match TestReport::compute(
            self.mode,
            self.questions.clone(),
            self.answers.clone(),
            self.started_at,
            completed_at,
            time_expired,
        ) {
            Ok(report) => {
                self.report = Some(report.clone());
                Transition::Finished(report)
            }
            // Unreachable: the sheet is non-empty, the slot counts match and
            // completed_at is clamped. Kept as a no-op to honor the
            // never-crash contract.
            Err(_) => Transition::Ignored,
        }
    }

    //
    // ─── ACCESSORS ─────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.position]
    }

    /// The recorded answer for the current position, if any.
    #[must_use]
    pub fn selected_answer(&self) -> Option<usize> {
        self.answers[self.position]
    }

    /// The recorded answer for an arbitrary position (navigator grid).
    #[must_use]
    pub fn answer_at(&self, index: usize) -> Option<usize> {
        self.answers.get(index).copied().flatten()
    }

    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.phase == Phase::Revealed
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|slot| slot.is_some()).count()
    }

    #[must_use]
    pub fn unanswered_count(&self) -> usize {
        self.answers.len() - self.answered_count()
    }

    /// Remaining mock-test seconds; `None` outside timed mode or after
    /// completion.
    #[must_use]
    pub fn remaining_secs(&self) -> Option<u32> {
        self.countdown.map(|countdown| countdown.remaining)
    }

    #[must_use]
    pub fn timer_total_secs(&self) -> Option<u32> {
        self.countdown.map(|countdown| countdown.total)
    }

    #[must_use]
    pub fn timer_band(&self) -> Option<TimerBand> {
        self.countdown.map(|countdown| countdown.band())
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// The report produced at completion, if the session has finished.
    #[must_use]
    pub fn report(&self) -> Option<&TestReport> {
        self.report.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{QuestionDraft, QuestionId, TopicId};
    use crate::time::fixed_now;

    fn build_question(id: u64, correct: usize) -> Question {
        QuestionDraft {
            prompt: format!("Question {id}"),
            image: None,
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct_option: correct,
            explanation: "explained".into(),
        }
        .validate(QuestionId::new(id), TopicId::new(1))
        .unwrap()
    }

    fn quick_session(correct: &[usize]) -> QuizSession {
        let questions = correct
            .iter()
            .enumerate()
            .map(|(i, c)| build_question(i as u64 + 1, *c))
            .collect();
        QuizSession::new(questions, SessionMode::Quick, fixed_now()).unwrap()
    }

    fn mock_session(len: usize) -> QuizSession {
        let questions = (1..=len as u64).map(|id| build_question(id, 0)).collect();
        QuizSession::new(questions, SessionMode::Mock, fixed_now()).unwrap()
    }

    #[test]
    fn empty_session_is_rejected() {
        let err = QuizSession::new(Vec::new(), SessionMode::Quick, fixed_now()).unwrap_err();
        assert!(matches!(err, SessionError::Empty));
    }

    #[test]
    fn select_records_and_reveals() {
        let mut session = quick_session(&[1, 1]);
        let transition = session.select_answer(1);
        assert!(matches!(
            transition,
            Transition::Revealed { correct: true, .. }
        ));
        assert_eq!(session.selected_answer(), Some(1));
        assert_eq!(session.phase(), Phase::Revealed);
    }

    #[test]
    fn out_of_range_selection_is_ignored() {
        let mut session = quick_session(&[0]);
        assert_eq!(session.select_answer(4), Transition::Ignored);
        assert_eq!(session.selected_answer(), None);
        assert_eq!(session.phase(), Phase::Answering);
    }

    #[test]
    fn second_selection_while_revealed_is_ignored() {
        let mut session = quick_session(&[1, 1]);
        session.select_answer(1);
        assert_eq!(session.select_answer(2), Transition::Ignored);
        assert_eq!(session.selected_answer(), Some(1));
    }

    #[test]
    fn perfect_two_question_run_scores_100() {
        let mut session = quick_session(&[1, 1]);
        session.select_answer(1);
        session.next(fixed_now());
        session.select_answer(1);
        let Transition::Finished(report) = session.next(fixed_now()) else {
            panic!("expected completion");
        };
        assert_eq!(report.score(), 100);
        assert_eq!(report.correct(), 2);
        assert!(report.passed());
        assert!(session.is_finished());
    }

    #[test]
    fn jump_preserves_recorded_answers() {
        let mut session = quick_session(&[0, 1, 2]);
        session.select_answer(2);
        assert!(matches!(session.jump(2), Transition::Moved { position: 2 }));
        assert_eq!(session.selected_answer(), None);
        assert!(matches!(session.jump(0), Transition::Moved { position: 0 }));
        assert_eq!(session.selected_answer(), Some(2));
        assert!(!session.is_revealed());
    }

    #[test]
    fn jump_out_of_range_is_ignored() {
        let mut session = quick_session(&[0, 1]);
        assert_eq!(session.jump(2), Transition::Ignored);
        assert_eq!(session.position(), 0);
    }

    #[test]
    fn skip_requires_unanswered_and_not_last() {
        let mut session = quick_session(&[0, 1]);
        assert!(matches!(session.skip(), Transition::Moved { position: 1 }));
        // last question: skip has nowhere to go
        assert_eq!(session.skip(), Transition::Ignored);

        session.jump(0);
        session.select_answer(0);
        session.jump(0);
        // answered now, so skip is rejected
        assert_eq!(session.skip(), Transition::Ignored);
    }

    #[test]
    fn finish_with_unanswered_requires_confirmation() {
        let mut session = quick_session(&[1, 1]);
        session.select_answer(1);
        // position 0 answered, position 1 untouched; finish from reveal
        let transition = session.request_finish(fixed_now());
        assert_eq!(transition, Transition::ConfirmRequired { unanswered: 1 });
        assert_eq!(session.phase(), Phase::ConfirmFinish);

        let Transition::Finished(report) = session.confirm_finish(fixed_now()) else {
            panic!("expected completion");
        };
        assert_eq!(report.correct(), 1);
        assert_eq!(report.unanswered(), 1);
        assert!(!report.time_expired());
    }

    #[test]
    fn cancel_finish_returns_to_answering() {
        let mut session = quick_session(&[1, 1]);
        session.request_finish(fixed_now());
        assert_eq!(session.cancel_finish(), Transition::Resumed);
        assert_eq!(session.phase(), Phase::Answering);
        // the sheet is untouched
        assert_eq!(session.answered_count(), 0);
    }

    #[test]
    fn resubmitting_after_jump_overwrites_without_double_count() {
        let mut session = quick_session(&[1, 1]);
        session.select_answer(0);
        session.jump(0);
        session.select_answer(1);
        session.jump(0);
        assert_eq!(session.selected_answer(), Some(1));
        assert_eq!(session.answered_count(), 1);
    }

    #[test]
    fn auto_advance_honors_only_latest_token() {
        let mut session = quick_session(&[1, 1, 1]);
        let Transition::Revealed { token: stale, .. } = session.select_answer(1) else {
            panic!("expected reveal");
        };
        session.next(fixed_now());
        let Transition::Revealed { token: fresh, .. } = session.select_answer(1) else {
            panic!("expected reveal");
        };
        // the first question's scheduled advance fires late
        assert_eq!(session.auto_advance(stale, fixed_now()), Transition::Ignored);
        assert!(matches!(
            session.auto_advance(fresh, fixed_now()),
            Transition::Moved { position: 2 }
        ));
        // and cannot fire twice
        assert_eq!(session.auto_advance(fresh, fixed_now()), Transition::Ignored);
    }

    #[test]
    fn countdown_decrements_by_one_and_never_goes_negative() {
        let mut session = mock_session(2);
        let start = session.remaining_secs().unwrap();
        assert_eq!(start, MOCK_DURATION_SECS);

        let Transition::Ticked { remaining, .. } = session.tick(fixed_now()) else {
            panic!("expected tick");
        };
        assert_eq!(remaining, start - 1);
    }

    #[test]
    fn countdown_expiry_completes_once_and_bypasses_confirmation() {
        let mut session = mock_session(2);
        session.select_answer(0);
        // drain the clock; no confirmation should be demanded for the
        // unanswered second slot
        let mut finished = 0;
        for _ in 0..MOCK_DURATION_SECS + 5 {
            if let Transition::Finished(report) = session.tick(fixed_now()) {
                finished += 1;
                assert!(report.time_expired());
                assert_eq!(report.correct(), 1);
                assert_eq!(report.unanswered(), 1);
            }
        }
        assert_eq!(finished, 1);
        assert_eq!(session.remaining_secs(), None);
    }

    #[test]
    fn countdown_keeps_running_through_confirmation() {
        let mut session = mock_session(2);
        session.request_finish(fixed_now());
        assert_eq!(session.phase(), Phase::ConfirmFinish);
        assert!(matches!(
            session.tick(fixed_now()),
            Transition::Ticked { .. }
        ));
    }

    #[test]
    fn tick_without_timer_is_ignored() {
        let mut session = quick_session(&[0]);
        assert_eq!(session.tick(fixed_now()), Transition::Ignored);
    }

    #[test]
    fn timer_bands_partition_at_70_and_30_percent() {
        let mut countdown = Countdown::new(100);
        assert_eq!(countdown.band(), TimerBand::Comfortable);
        countdown.remaining = 70;
        assert_eq!(countdown.band(), TimerBand::Steady);
        countdown.remaining = 31;
        assert_eq!(countdown.band(), TimerBand::Steady);
        countdown.remaining = 30;
        assert_eq!(countdown.band(), TimerBand::Critical);
    }

    #[test]
    fn input_after_finish_is_ignored() {
        let mut session = quick_session(&[0]);
        session.select_answer(0);
        let Transition::Finished(_) = session.next(fixed_now()) else {
            panic!("expected completion");
        };
        assert_eq!(session.select_answer(0), Transition::Ignored);
        assert_eq!(session.jump(0), Transition::Ignored);
        assert_eq!(session.request_finish(fixed_now()), Transition::Ignored);
        assert!(session.report().is_some());
    }
}
