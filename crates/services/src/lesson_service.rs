use std::sync::Arc;

use k53_core::model::{Lesson, Topic, TopicId};
use storage::repository::{QuestionRepository, TopicRepository};

use crate::error::LessonError;

/// One node of the learning path: a topic plus how many bank questions it
/// carries.
#[derive(Debug, Clone)]
pub struct LearningPathNode {
    pub topic: Topic,
    pub question_count: u64,
}

/// Read side of the lesson browser.
#[derive(Clone)]
pub struct LessonService {
    topics: Arc<dyn TopicRepository>,
    questions: Arc<dyn QuestionRepository>,
}

impl LessonService {
    #[must_use]
    pub fn new(topics: Arc<dyn TopicRepository>, questions: Arc<dyn QuestionRepository>) -> Self {
        Self { topics, questions }
    }

    /// All topics in path order, each with its question count.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::Storage` for storage failures.
    pub async fn learning_path(&self) -> Result<Vec<LearningPathNode>, LessonError> {
        let topics = self.topics.list_topics().await?;
        let mut nodes = Vec::with_capacity(topics.len());
        for topic in topics {
            let question_count = self.questions.count_questions(Some(topic.id())).await?;
            nodes.push(LearningPathNode {
                topic,
                question_count,
            });
        }
        Ok(nodes)
    }

    /// The lesson for a topic, together with the topic metadata.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::NotFound` for an unknown topic id.
    pub async fn lesson(&self, id: TopicId) -> Result<(Topic, Lesson), LessonError> {
        let topic = self.topics.get_topic(id).await?;
        let lesson = self.topics.get_lesson(id).await?;
        Ok((topic, lesson))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k53_core::model::{LessonSection, QuestionDraft, QuestionId};
    use storage::repository::InMemoryRepository;

    async fn seeded() -> InMemoryRepository {
        let repo = InMemoryRepository::new();
        let topic = Topic::new(TopicId::new(1), "Road Signs", "Essential", "signs").unwrap();
        repo.upsert_topic(&topic).await.unwrap();
        repo.upsert_lesson(
            &Lesson::new(
                TopicId::new(1),
                "15 min",
                50,
                vec![LessonSection {
                    title: "Signs".into(),
                    paragraphs: vec!["Triangles warn.".into()],
                }],
                vec![],
            )
            .unwrap(),
        )
        .await
        .unwrap();
        let question = QuestionDraft {
            prompt: "Q1".into(),
            image: None,
            options: vec!["a".into(), "b".into()],
            correct_option: 0,
            explanation: "e".into(),
        }
        .validate(QuestionId::new(1), TopicId::new(1))
        .unwrap();
        repo.upsert_question(&question).await.unwrap();
        repo
    }

    #[tokio::test]
    async fn learning_path_joins_question_counts() {
        let repo = seeded().await;
        let service = LessonService::new(Arc::new(repo.clone()), Arc::new(repo));

        let path = service.learning_path().await.unwrap();
        assert_eq!(path.len(), 1);
        assert_eq!(path[0].topic.name(), "Road Signs");
        assert_eq!(path[0].question_count, 1);
    }

    #[tokio::test]
    async fn unknown_topic_is_not_found() {
        let repo = seeded().await;
        let service = LessonService::new(Arc::new(repo.clone()), Arc::new(repo));

        let err = service.lesson(TopicId::new(42)).await.unwrap_err();
        assert!(matches!(err, LessonError::NotFound));
    }
}
