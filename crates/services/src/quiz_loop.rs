use std::sync::Arc;

use rand::seq::SliceRandom;
use tracing::{debug, warn};

use k53_core::model::{Preferences, SessionMode};
use k53_core::session::{AdvanceToken, QUICK_PRACTICE_SIZE, QuizSession, Transition};
use storage::repository::{PreferencesRepository, QuestionCriteria, QuestionRepository};

use crate::Clock;
use crate::error::QuizError;
use crate::sound::SoundPlayer;

/// Orchestrates session start and the clocked transitions of a running
/// session.
///
/// The state machine itself is pure; this service supplies the question set,
/// the timestamps, and the answer-submit sound cue (gated by the current
/// preferences, re-read on every submit).
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    questions: Arc<dyn QuestionRepository>,
    preferences: Arc<dyn PreferencesRepository>,
    sound: Arc<dyn SoundPlayer>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(
        clock: Clock,
        questions: Arc<dyn QuestionRepository>,
        preferences: Arc<dyn PreferencesRepository>,
        sound: Arc<dyn SoundPlayer>,
    ) -> Self {
        Self {
            clock,
            questions,
            preferences,
            sound,
        }
    }

    /// Start a new session for the given mode.
    ///
    /// Quick practice draws a shuffled subset; topic practice takes the
    /// topic's questions in bank order; the mock test takes the whole bank in
    /// bank order so a sitting is reproducible.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Empty` when the criteria match no questions, or a
    /// storage error from the fetch.
    pub async fn start(&self, mode: SessionMode) -> Result<QuizSession, QuizError> {
        let questions = match mode {
            SessionMode::Quick => {
                let mut all = self.questions.fetch_set(&QuestionCriteria::all()).await?;
                all.shuffle(&mut rand::rng());
                all.truncate(QUICK_PRACTICE_SIZE);
                all
            }
            SessionMode::Topic(topic) => {
                self.questions
                    .fetch_set(&QuestionCriteria::for_topic(topic))
                    .await?
            }
            SessionMode::Mock => self.questions.fetch_set(&QuestionCriteria::all()).await?,
        };

        let preferences = self.current_preferences().await;
        debug!(
            %mode,
            count = questions.len(),
            sound = preferences.sound_enabled,
            "starting session"
        );
        QuizSession::new(questions, mode, self.clock.now()).map_err(|_| QuizError::Empty)
    }

    /// Apply a selection and, when it reveals, emit the matching sound cue if
    /// the preference allows it.
    pub async fn select_answer(&self, session: &mut QuizSession, option: usize) -> Transition {
        let transition = session.select_answer(option);
        if let Transition::Revealed { correct, .. } = transition {
            if self.current_preferences().await.sound_enabled {
                if correct {
                    self.sound.positive_cue();
                } else {
                    self.sound.negative_cue();
                }
            }
        }
        transition
    }

    /// Advance past a revealed question (the Next control).
    pub fn advance(&self, session: &mut QuizSession) -> Transition {
        session.next(self.clock.now())
    }

    /// The scheduled auto-advance after a reveal.
    pub fn auto_advance(&self, session: &mut QuizSession, token: AdvanceToken) -> Transition {
        session.auto_advance(token, self.clock.now())
    }

    /// Ask to finish the session.
    pub fn request_finish(&self, session: &mut QuizSession) -> Transition {
        session.request_finish(self.clock.now())
    }

    /// Confirm a pending finish.
    pub fn confirm_finish(&self, session: &mut QuizSession) -> Transition {
        session.confirm_finish(self.clock.now())
    }

    /// One second of mock-test time.
    pub fn tick(&self, session: &mut QuizSession) -> Transition {
        session.tick(self.clock.now())
    }

    async fn current_preferences(&self) -> Preferences {
        match self.preferences.get_preferences().await {
            Ok(Some(preferences)) => preferences,
            Ok(None) => Preferences::default(),
            Err(err) => {
                warn!(%err, "preferences unreadable, using defaults");
                Preferences::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use k53_core::model::{QuestionDraft, QuestionId, TopicId};
    use k53_core::time::fixed_clock;
    use storage::repository::InMemoryRepository;

    #[derive(Default)]
    struct RecordingSoundPlayer {
        positive: AtomicUsize,
        negative: AtomicUsize,
    }

    impl SoundPlayer for RecordingSoundPlayer {
        fn positive_cue(&self) {
            self.positive.fetch_add(1, Ordering::SeqCst);
        }

        fn negative_cue(&self) {
            self.negative.fetch_add(1, Ordering::SeqCst);
        }
    }

    async fn seeded_repo(count: u64) -> InMemoryRepository {
        let repo = InMemoryRepository::new();
        for id in 1..=count {
            let question = QuestionDraft {
                prompt: format!("Q{id}"),
                image: None,
                options: vec!["a".into(), "b".into(), "c".into()],
                correct_option: 0,
                explanation: "e".into(),
            }
            .validate(QuestionId::new(id), TopicId::new(1 + id % 2))
            .unwrap();
            repo.upsert_question(&question).await.unwrap();
        }
        repo
    }

    fn service(repo: &InMemoryRepository, sound: Arc<dyn SoundPlayer>) -> QuizLoopService {
        QuizLoopService::new(
            fixed_clock(),
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
            sound,
        )
    }

    #[tokio::test]
    async fn quick_practice_draws_a_bounded_subset() {
        let repo = seeded_repo(15).await;
        let service = service(&repo, Arc::new(crate::NullSoundPlayer));

        let session = service.start(SessionMode::Quick).await.unwrap();
        assert_eq!(session.total(), QUICK_PRACTICE_SIZE);
    }

    #[tokio::test]
    async fn mock_takes_the_whole_bank_in_order() {
        let repo = seeded_repo(6).await;
        let service = service(&repo, Arc::new(crate::NullSoundPlayer));

        let mut session = service.start(SessionMode::Mock).await.unwrap();
        assert_eq!(session.total(), 6);
        for position in 0..session.total() {
            session.jump(position);
            assert_eq!(
                session.current_question().id(),
                QuestionId::new(position as u64 + 1)
            );
        }
    }

    #[tokio::test]
    async fn topic_practice_filters_by_topic() {
        let repo = seeded_repo(6).await;
        let service = service(&repo, Arc::new(crate::NullSoundPlayer));

        let session = service.start(SessionMode::Topic(TopicId::new(2))).await.unwrap();
        assert_eq!(session.total(), 3);
    }

    #[tokio::test]
    async fn empty_bank_is_an_error() {
        let repo = InMemoryRepository::new();
        let service = service(&repo, Arc::new(crate::NullSoundPlayer));

        let err = service.start(SessionMode::Quick).await.unwrap_err();
        assert!(matches!(err, QuizError::Empty));
    }

    #[tokio::test]
    async fn sound_cues_follow_correctness_and_preference() {
        let repo = seeded_repo(3).await;
        let sound = Arc::new(RecordingSoundPlayer::default());
        let service = service(&repo, sound.clone());

        let mut session = service.start(SessionMode::Topic(TopicId::new(2))).await.unwrap();
        service.select_answer(&mut session, 0).await; // correct
        service.advance(&mut session);
        service.select_answer(&mut session, 1).await; // incorrect
        assert_eq!(sound.positive.load(Ordering::SeqCst), 1);
        assert_eq!(sound.negative.load(Ordering::SeqCst), 1);

        // disable sound: no further cues
        repo.save_preferences(&k53_core::model::Preferences {
            sound_enabled: false,
            communication_enabled: true,
        })
        .await
        .unwrap();
        service.advance(&mut session);
        service.select_answer(&mut session, 0).await;
        assert_eq!(sound.positive.load(Ordering::SeqCst), 1);
        assert_eq!(sound.negative.load(Ordering::SeqCst), 1);
    }
}
