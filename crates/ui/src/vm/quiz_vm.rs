use k53_core::model::{Question, SessionMode};
use k53_core::session::{AdvanceToken, Phase, QuizSession, TimerBand, Transition};
use services::{QuizError, QuizLoopService};

use crate::views::ViewError;

/// Everything the quiz screen can ask of a running session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Select(usize),
    Next,
    Previous,
    Jump(usize),
    Skip,
    Finish,
    ConfirmFinish,
    CancelFinish,
    Tick,
    AutoAdvance(AdvanceToken),
}

/// Wraps the core session for the quiz view. Dispatching an intent applies
/// exactly one transition; the view decides what to do with the result.
pub struct QuizVm {
    session: QuizSession,
}

impl QuizVm {
    #[must_use]
    pub fn new(session: QuizSession) -> Self {
        Self { session }
    }

    /// Apply one intent. Async because an answer submit re-reads the sound
    /// preference; every other intent resolves immediately.
    pub async fn apply(&mut self, service: &QuizLoopService, intent: QuizIntent) -> Transition {
        match intent {
            QuizIntent::Select(option) => service.select_answer(&mut self.session, option).await,
            QuizIntent::Next => service.advance(&mut self.session),
            QuizIntent::Previous => {
                let position = self.session.position();
                if position > 0 {
                    self.session.jump(position - 1)
                } else {
                    Transition::Ignored
                }
            }
            QuizIntent::Jump(target) => self.session.jump(target),
            QuizIntent::Skip => self.session.skip(),
            QuizIntent::Finish => service.request_finish(&mut self.session),
            QuizIntent::ConfirmFinish => service.confirm_finish(&mut self.session),
            QuizIntent::CancelFinish => self.session.cancel_finish(),
            QuizIntent::Tick => service.tick(&mut self.session),
            QuizIntent::AutoAdvance(token) => service.auto_advance(&mut self.session, token),
        }
    }

    #[must_use]
    pub fn mode(&self) -> SessionMode {
        self.session.mode()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.session.position()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.session.total()
    }

    #[must_use]
    pub fn question(&self) -> &Question {
        self.session.current_question()
    }

    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.session.selected_answer()
    }

    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.session.is_revealed()
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.session.answered_count()
    }

    #[must_use]
    pub fn unanswered_count(&self) -> usize {
        self.session.unanswered_count()
    }

    #[must_use]
    pub fn answer_at(&self, index: usize) -> Option<usize> {
        self.session.answer_at(index)
    }

    /// Answered share of the sheet, for the progress bar.
    #[must_use]
    pub fn progress_percent(&self) -> u32 {
        let total = self.session.total().max(1);
        (self.session.answered_count() * 100 / total) as u32
    }

    #[must_use]
    pub fn remaining_secs(&self) -> Option<u32> {
        self.session.remaining_secs()
    }

    #[must_use]
    pub fn timer_total_secs(&self) -> Option<u32> {
        self.session.timer_total_secs()
    }

    #[must_use]
    pub fn timer_band(&self) -> Option<TimerBand> {
        self.session.timer_band()
    }
}

/// Screen title per mode.
#[must_use]
pub fn mode_title(mode: SessionMode) -> &'static str {
    match mode {
        SessionMode::Mock => "Mock Theory Test",
        SessionMode::Quick => "Quick Practice",
        SessionMode::Topic(_) => "Topic Practice",
    }
}

/// # Errors
///
/// Returns `ViewError::EmptySession` when no questions match the mode.
/// Returns `ViewError::Unknown` for other failures.
pub async fn start_quiz(service: &QuizLoopService, mode: SessionMode) -> Result<QuizVm, ViewError> {
    match service.start(mode).await {
        Ok(session) => Ok(QuizVm::new(session)),
        Err(QuizError::Empty) => Err(ViewError::EmptySession),
        Err(_) => Err(ViewError::Unknown),
    }
}
