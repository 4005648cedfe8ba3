use k53_core::model::TestReport;

use crate::vm::time_fmt::format_datetime;

/// Results-screen shape of a finished session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportVm {
    pub title: String,
    pub score: u32,
    pub correct: usize,
    pub total: usize,
    pub passed: bool,
    pub pass_mark: usize,
    pub needed_more: usize,
    pub time_expired: bool,
    pub unanswered: usize,
    pub xp_earned: usize,
    pub badges: Vec<String>,
    pub completed_at_str: String,
}

/// XP is cosmetic: ten points per correct answer, matching the dashboard
/// numbers. Nothing downstream computes with it.
#[must_use]
pub fn map_report(report: &TestReport) -> ReportVm {
    let mut badges = Vec::new();
    if report.score() >= 90 {
        badges.push("High Scorer".to_string());
    }
    ReportVm {
        title: if report.passed() {
            "Congratulations!".to_string()
        } else {
            "Keep Practicing!".to_string()
        },
        score: report.score(),
        correct: report.correct(),
        total: report.total(),
        passed: report.passed(),
        pass_mark: report.pass_mark(),
        needed_more: report.pass_mark().saturating_sub(report.correct()),
        time_expired: report.time_expired(),
        unanswered: report.unanswered(),
        xp_earned: report.correct() * 10,
        badges,
        completed_at_str: format_datetime(report.completed_at()),
    }
}

/// One question on the answer-review screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewRowVm {
    pub number: usize,
    pub prompt: String,
    pub options: Vec<String>,
    pub user_answer: Option<usize>,
    pub correct_answer: usize,
    pub explanation: String,
    pub is_correct: bool,
}

#[must_use]
pub fn map_review_rows(report: &TestReport) -> Vec<ReviewRowVm> {
    report
        .questions()
        .iter()
        .zip(report.answers())
        .enumerate()
        .map(|(index, (question, answer))| ReviewRowVm {
            number: index + 1,
            prompt: question.prompt().to_string(),
            options: question.options().to_vec(),
            user_answer: *answer,
            correct_answer: question.correct_option(),
            explanation: question.explanation().to_string(),
            is_correct: answer.is_some_and(|a| question.is_correct(a)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use k53_core::model::{QuestionDraft, QuestionId, SessionMode, TopicId};
    use k53_core::time::fixed_now;

    fn build_report(answers: Vec<Option<usize>>) -> TestReport {
        let questions = (1..=answers.len() as u64)
            .map(|id| {
                QuestionDraft {
                    prompt: format!("Q{id}"),
                    image: None,
                    options: vec!["a".into(), "b".into()],
                    correct_option: 0,
                    explanation: "e".into(),
                }
                .validate(QuestionId::new(id), TopicId::new(1))
                .unwrap()
            })
            .collect();
        TestReport::compute(
            SessionMode::Quick,
            questions,
            answers,
            fixed_now(),
            fixed_now(),
            false,
        )
        .unwrap()
    }

    #[test]
    fn high_score_earns_the_badge() {
        let vm = map_report(&build_report(vec![Some(0), Some(0)]));
        assert_eq!(vm.score, 100);
        assert_eq!(vm.xp_earned, 20);
        assert_eq!(vm.badges, vec!["High Scorer".to_string()]);
        assert_eq!(vm.title, "Congratulations!");
    }

    #[test]
    fn failed_report_counts_what_is_missing() {
        let vm = map_report(&build_report(vec![Some(0), None]));
        assert!(!vm.passed);
        assert_eq!(vm.pass_mark, 2);
        assert_eq!(vm.needed_more, 1);
        assert!(vm.badges.is_empty());
    }

    #[test]
    fn review_rows_carry_correctness() {
        let rows = map_review_rows(&build_report(vec![Some(1), None]));
        assert_eq!(rows.len(), 2);
        assert!(!rows[0].is_correct);
        assert_eq!(rows[0].user_answer, Some(1));
        assert_eq!(rows[1].user_answer, None);
        assert_eq!(rows[0].number, 1);
    }
}
