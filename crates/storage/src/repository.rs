use async_trait::async_trait;
use k53_core::model::{
    Lesson, LessonSection, Preferences, Question, QuestionDraft, QuestionError, QuestionId, Topic,
    TopicId,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Selection criteria for a question fetch.
///
/// The quiz loop depends only on this interface; nothing above storage ever
/// sees a fixed in-memory list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuestionCriteria {
    pub topic: Option<TopicId>,
    pub limit: Option<u32>,
}

impl QuestionCriteria {
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn for_topic(topic: TopicId) -> Self {
        Self {
            topic: Some(topic),
            limit: None,
        }
    }
}

/// Persisted shape for a question. Options travel as a JSON array so
/// repositories can serialize without leaking storage concerns into the
/// domain layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: u64,
    pub topic_id: u64,
    pub prompt: String,
    pub image: Option<String>,
    pub options: Vec<String>,
    pub correct_option: usize,
    pub explanation: String,
}

impl QuestionRecord {
    #[must_use]
    pub fn from_question(question: &Question) -> Self {
        Self {
            id: question.id().value(),
            topic_id: question.topic_id().value(),
            prompt: question.prompt().to_owned(),
            image: question.image().map(|image| image.as_str().to_owned()),
            options: question.options().to_vec(),
            correct_option: question.correct_option(),
            explanation: question.explanation().to_owned(),
        }
    }

    /// Convert the record back into a domain `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the persisted data fails domain validation.
    pub fn into_question(self) -> Result<Question, QuestionError> {
        QuestionDraft {
            prompt: self.prompt,
            image: self.image,
            options: self.options,
            correct_option: self.correct_option,
            explanation: self.explanation,
        }
        .validate(QuestionId::new(self.id), TopicId::new(self.topic_id))
    }
}

/// Persisted shape for one lesson section (JSON column).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionRecord {
    pub title: String,
    pub paragraphs: Vec<String>,
}

impl SectionRecord {
    #[must_use]
    pub fn from_section(section: &LessonSection) -> Self {
        Self {
            title: section.title.clone(),
            paragraphs: section.paragraphs.clone(),
        }
    }

    #[must_use]
    pub fn into_section(self) -> LessonSection {
        LessonSection {
            title: self.title,
            paragraphs: self.paragraphs,
        }
    }
}

/// Repository contract for the question bank.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Persist or update a question.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the question cannot be stored.
    async fn upsert_question(&self, question: &Question) -> Result<(), StorageError>;

    /// Fetch the ordered question set matching the criteria.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for connection or decoding failures. An empty
    /// match is an empty vec, not an error.
    async fn fetch_set(&self, criteria: &QuestionCriteria) -> Result<Vec<Question>, StorageError>;

    /// Count questions, optionally per topic.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for connection failures.
    async fn count_questions(&self, topic: Option<TopicId>) -> Result<u64, StorageError>;
}

/// Repository contract for topics and their lesson content.
#[async_trait]
pub trait TopicRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the topic cannot be stored.
    async fn upsert_topic(&self, topic: &Topic) -> Result<(), StorageError>;

    /// Topics in id order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for connection or decoding failures.
    async fn list_topics(&self) -> Result<Vec<Topic>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing.
    async fn get_topic(&self, id: TopicId) -> Result<Topic, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the lesson cannot be stored.
    async fn upsert_lesson(&self, lesson: &Lesson) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` for an unknown topic.
    async fn get_lesson(&self, id: TopicId) -> Result<Lesson, StorageError>;
}

/// Repository contract for the persisted user preferences.
#[async_trait]
pub trait PreferencesRepository: Send + Sync {
    /// `Ok(None)` when nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for connection or decoding failures; the
    /// service layer maps those to defaults.
    async fn get_preferences(&self) -> Result<Option<Preferences>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the preferences cannot be stored.
    async fn save_preferences(&self, preferences: &Preferences) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    questions: Arc<Mutex<BTreeMap<u64, Question>>>,
    topics: Arc<Mutex<BTreeMap<u64, Topic>>>,
    lessons: Arc<Mutex<BTreeMap<u64, Lesson>>>,
    preferences: Arc<Mutex<Option<Preferences>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock<T>(mutex: &Mutex<T>) -> Result<std::sync::MutexGuard<'_, T>, StorageError> {
        mutex
            .lock()
            .map_err(|err| StorageError::Connection(err.to_string()))
    }
}

#[async_trait]
impl QuestionRepository for InMemoryRepository {
    async fn upsert_question(&self, question: &Question) -> Result<(), StorageError> {
        let mut guard = Self::lock(&self.questions)?;
        guard.insert(question.id().value(), question.clone());
        Ok(())
    }

    async fn fetch_set(&self, criteria: &QuestionCriteria) -> Result<Vec<Question>, StorageError> {
        let guard = Self::lock(&self.questions)?;
        let matches = guard
            .values()
            .filter(|question| criteria.topic.is_none_or(|topic| question.topic_id() == topic))
            .take(criteria.limit.map_or(usize::MAX, |limit| limit as usize))
            .cloned()
            .collect();
        Ok(matches)
    }

    async fn count_questions(&self, topic: Option<TopicId>) -> Result<u64, StorageError> {
        let guard = Self::lock(&self.questions)?;
        let count = guard
            .values()
            .filter(|question| topic.is_none_or(|topic| question.topic_id() == topic))
            .count();
        Ok(count as u64)
    }
}

#[async_trait]
impl TopicRepository for InMemoryRepository {
    async fn upsert_topic(&self, topic: &Topic) -> Result<(), StorageError> {
        let mut guard = Self::lock(&self.topics)?;
        guard.insert(topic.id().value(), topic.clone());
        Ok(())
    }

    async fn list_topics(&self) -> Result<Vec<Topic>, StorageError> {
        let guard = Self::lock(&self.topics)?;
        Ok(guard.values().cloned().collect())
    }

    async fn get_topic(&self, id: TopicId) -> Result<Topic, StorageError> {
        let guard = Self::lock(&self.topics)?;
        guard.get(&id.value()).cloned().ok_or(StorageError::NotFound)
    }

    async fn upsert_lesson(&self, lesson: &Lesson) -> Result<(), StorageError> {
        let mut guard = Self::lock(&self.lessons)?;
        guard.insert(lesson.topic_id().value(), lesson.clone());
        Ok(())
    }

    async fn get_lesson(&self, id: TopicId) -> Result<Lesson, StorageError> {
        let guard = Self::lock(&self.lessons)?;
        guard.get(&id.value()).cloned().ok_or(StorageError::NotFound)
    }
}

#[async_trait]
impl PreferencesRepository for InMemoryRepository {
    async fn get_preferences(&self) -> Result<Option<Preferences>, StorageError> {
        let guard = Self::lock(&self.preferences)?;
        Ok(*guard)
    }

    async fn save_preferences(&self, preferences: &Preferences) -> Result<(), StorageError> {
        let mut guard = Self::lock(&self.preferences)?;
        *guard = Some(*preferences);
        Ok(())
    }
}

/// Aggregates the repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub questions: Arc<dyn QuestionRepository>,
    pub topics: Arc<dyn TopicRepository>,
    pub preferences: Arc<dyn PreferencesRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let questions: Arc<dyn QuestionRepository> = Arc::new(repo.clone());
        let topics: Arc<dyn TopicRepository> = Arc::new(repo.clone());
        let preferences: Arc<dyn PreferencesRepository> = Arc::new(repo);
        Self {
            questions,
            topics,
            preferences,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k53_core::model::QuestionDraft;

    fn build_question(id: u64, topic: u64) -> Question {
        QuestionDraft {
            prompt: format!("Q{id}"),
            image: None,
            options: vec!["a".into(), "b".into()],
            correct_option: 1,
            explanation: "because".into(),
        }
        .validate(QuestionId::new(id), TopicId::new(topic))
        .unwrap()
    }

    #[tokio::test]
    async fn fetch_set_filters_by_topic_in_id_order() {
        let repo = InMemoryRepository::new();
        for (id, topic) in [(3, 1), (1, 1), (2, 2)] {
            repo.upsert_question(&build_question(id, topic)).await.unwrap();
        }

        let all = repo.fetch_set(&QuestionCriteria::all()).await.unwrap();
        assert_eq!(
            all.iter().map(|q| q.id().value()).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );

        let topic_one = repo
            .fetch_set(&QuestionCriteria::for_topic(TopicId::new(1)))
            .await
            .unwrap();
        assert_eq!(topic_one.len(), 2);
        assert_eq!(repo.count_questions(Some(TopicId::new(2))).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn lesson_lookup_surfaces_not_found() {
        let repo = InMemoryRepository::new();
        let err = repo.get_lesson(TopicId::new(9)).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }

    #[tokio::test]
    async fn preferences_round_trip() {
        let repo = InMemoryRepository::new();
        assert!(repo.get_preferences().await.unwrap().is_none());

        let prefs = Preferences::default().with_sound_toggled();
        repo.save_preferences(&prefs).await.unwrap();
        assert_eq!(repo.get_preferences().await.unwrap(), Some(prefs));
    }

    #[test]
    fn question_record_round_trips() {
        let question = build_question(5, 2);
        let record = QuestionRecord::from_question(&question);
        let back = record.into_question().unwrap();
        assert_eq!(back, question);
    }

    #[test]
    fn corrupt_record_fails_domain_validation() {
        let record = QuestionRecord {
            id: 1,
            topic_id: 1,
            prompt: "Q".into(),
            image: None,
            options: vec!["a".into(), "b".into()],
            correct_option: 7,
            explanation: "e".into(),
        };
        assert!(record.into_question().is_err());
    }
}
