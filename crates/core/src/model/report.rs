use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::TopicId;
use crate::model::question::Question;

/// How a practice session was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// A short, shuffled practice round over the whole bank.
    Quick,
    /// Practice restricted to one topic.
    Topic(TopicId),
    /// The timed mock theory test over the full bank.
    Mock,
}

impl SessionMode {
    /// True for the timed mock test.
    #[must_use]
    pub fn is_timed(&self) -> bool {
        matches!(self, SessionMode::Mock)
    }
}

impl fmt::Display for SessionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionMode::Quick => write!(f, "quick"),
            SessionMode::Mock => write!(f, "mock"),
            SessionMode::Topic(id) => write!(f, "topic-{id}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseModeError {
    raw: String,
}

impl fmt::Display for ParseModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown session mode: {}", self.raw)
    }
}

impl std::error::Error for ParseModeError {}

impl FromStr for SessionMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quick" => Ok(SessionMode::Quick),
            "mock" => Ok(SessionMode::Mock),
            other => other
                .strip_prefix("topic-")
                .and_then(|raw| raw.parse::<TopicId>().ok())
                .map(SessionMode::Topic)
                .ok_or_else(|| ParseModeError {
                    raw: other.to_string(),
                }),
        }
    }
}

/// Minimum number of correct answers needed to pass a test of `total`
/// questions: `ceil(total * 0.86)`, the K53 pass requirement.
#[must_use]
pub fn pass_mark(total: usize) -> usize {
    (total * 86).div_ceil(100)
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ReportError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("answer slots ({answers}) do not match question count ({questions})")]
    SlotMismatch { answers: usize, questions: usize },

    #[error("report needs at least one question")]
    Empty,
}

/// The outcome of one finished session: the only artifact that crosses from
/// the quiz runner to the results and review screens. Derived, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct TestReport {
    mode: SessionMode,
    correct: usize,
    score: u32,
    passed: bool,
    pass_mark: usize,
    time_expired: bool,
    questions: Vec<Question>,
    answers: Vec<Option<usize>>,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
}

impl TestReport {
    /// Score a finished answer sheet. Unanswered slots never count as correct.
    ///
    /// # Errors
    ///
    /// Returns `ReportError` if the sheet is empty, the slot counts disagree,
    /// or `completed_at` precedes `started_at`.
    pub fn compute(
        mode: SessionMode,
        questions: Vec<Question>,
        answers: Vec<Option<usize>>,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        time_expired: bool,
    ) -> Result<Self, ReportError> {
        if questions.is_empty() {
            return Err(ReportError::Empty);
        }
        if answers.len() != questions.len() {
            return Err(ReportError::SlotMismatch {
                answers: answers.len(),
                questions: questions.len(),
            });
        }
        if completed_at < started_at {
            return Err(ReportError::InvalidTimeRange);
        }

        let correct = questions
            .iter()
            .zip(&answers)
            .filter(|(question, answer)| answer.is_some_and(|a| question.is_correct(a)))
            .count();
        let total = questions.len();
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let score = ((correct as f64 / total as f64) * 100.0).round() as u32;
        let pass_mark = pass_mark(total);

        Ok(Self {
            mode,
            correct,
            score,
            passed: correct >= pass_mark,
            pass_mark,
            time_expired,
            questions,
            answers,
            started_at,
            completed_at,
        })
    }

    #[must_use]
    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    #[must_use]
    pub fn correct(&self) -> usize {
        self.correct
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// Rounded percentage in `0..=100`.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn passed(&self) -> bool {
        self.passed
    }

    #[must_use]
    pub fn pass_mark(&self) -> usize {
        self.pass_mark
    }

    #[must_use]
    pub fn time_expired(&self) -> bool {
        self.time_expired
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    #[must_use]
    pub fn unanswered(&self) -> usize {
        self.answers.iter().filter(|slot| slot.is_none()).count()
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{QuestionDraft, QuestionId};
    use crate::time::fixed_now;

    fn build_question(id: u64, correct: usize) -> Question {
        QuestionDraft {
            prompt: format!("Q{id}"),
            image: None,
            options: vec!["a".into(), "b".into(), "c".into()],
            correct_option: correct,
            explanation: "because".into(),
        }
        .validate(QuestionId::new(id), TopicId::new(1))
        .unwrap()
    }

    #[test]
    fn pass_mark_boundary_at_fifty_questions() {
        assert_eq!(pass_mark(50), 43);
        assert_eq!(pass_mark(2), 2);
        assert_eq!(pass_mark(1), 1);
    }

    #[test]
    fn forty_two_of_fifty_fails_and_forty_three_passes() {
        let now = fixed_now();
        for (correct_count, expected_pass) in [(42, false), (43, true)] {
            let questions: Vec<_> = (1..=50).map(|id| build_question(id, 0)).collect();
            let answers: Vec<_> = (0..50)
                .map(|index| if index < correct_count { Some(0) } else { Some(1) })
                .collect();
            let report =
                TestReport::compute(SessionMode::Mock, questions, answers, now, now, false)
                    .unwrap();
            assert_eq!(report.correct(), correct_count);
            assert_eq!(report.passed(), expected_pass);
        }
    }

    #[test]
    fn perfect_two_question_sheet_passes() {
        let now = fixed_now();
        let questions = vec![build_question(1, 1), build_question(2, 1)];
        let report = TestReport::compute(
            SessionMode::Quick,
            questions,
            vec![Some(1), Some(1)],
            now,
            now,
            false,
        )
        .unwrap();

        assert_eq!(report.score(), 100);
        assert_eq!(report.correct(), 2);
        assert!(report.passed());
    }

    #[test]
    fn unanswered_slots_count_as_incorrect() {
        let now = fixed_now();
        let questions = vec![build_question(1, 0), build_question(2, 0)];
        let report = TestReport::compute(
            SessionMode::Quick,
            questions,
            vec![Some(0), None],
            now,
            now,
            false,
        )
        .unwrap();

        assert_eq!(report.correct(), 1);
        assert_eq!(report.score(), 50);
        assert_eq!(report.unanswered(), 1);
        assert!(!report.passed());
    }

    #[test]
    fn score_stays_within_bounds() {
        let now = fixed_now();
        let questions: Vec<_> = (1..=7).map(|id| build_question(id, 2)).collect();
        let answers = vec![Some(2), Some(0), None, Some(2), Some(1), None, Some(2)];
        let report =
            TestReport::compute(SessionMode::Mock, questions, answers, now, now, true).unwrap();

        assert!(report.correct() <= report.total());
        assert!(report.score() <= 100);
        assert!(report.time_expired());
    }

    #[test]
    fn rejects_slot_mismatch() {
        let now = fixed_now();
        let err = TestReport::compute(
            SessionMode::Quick,
            vec![build_question(1, 0)],
            vec![Some(0), None],
            now,
            now,
            false,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ReportError::SlotMismatch {
                answers: 2,
                questions: 1
            }
        ));
    }

    #[test]
    fn mode_roundtrips_through_display() {
        for mode in [
            SessionMode::Quick,
            SessionMode::Mock,
            SessionMode::Topic(TopicId::new(3)),
        ] {
            let parsed: SessionMode = mode.to_string().parse().unwrap();
            assert_eq!(parsed, mode);
        }
        assert!("king-of-the-hill".parse::<SessionMode>().is_err());
    }
}
