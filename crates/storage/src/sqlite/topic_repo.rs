use async_trait::async_trait;

use k53_core::model::{Lesson, Topic, TopicId};

use crate::repository::{SectionRecord, StorageError, TopicRepository};

use super::SqliteRepository;
use super::mapping::{map_lesson_row, map_topic_row, ser, u64_to_i64};

#[async_trait]
impl TopicRepository for SqliteRepository {
    async fn upsert_topic(&self, topic: &Topic) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO topics (id, name, category, summary)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                category = excluded.category,
                summary = excluded.summary
            ",
        )
        .bind(u64_to_i64("topic_id", topic.id().value())?)
        .bind(topic.name())
        .bind(topic.category())
        .bind(topic.summary())
        .execute(self.pool())
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }

    async fn list_topics(&self) -> Result<Vec<Topic>, StorageError> {
        let rows = sqlx::query("SELECT id, name, category, summary FROM topics ORDER BY id")
            .fetch_all(self.pool())
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        rows.iter().map(map_topic_row).collect()
    }

    async fn get_topic(&self, id: TopicId) -> Result<Topic, StorageError> {
        let row = sqlx::query("SELECT id, name, category, summary FROM topics WHERE id = ?1")
            .bind(u64_to_i64("topic_id", id.value())?)
            .fetch_optional(self.pool())
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        row.as_ref().map(map_topic_row).transpose()?.ok_or(StorageError::NotFound)
    }

    async fn upsert_lesson(&self, lesson: &Lesson) -> Result<(), StorageError> {
        let sections: Vec<SectionRecord> = lesson
            .sections()
            .iter()
            .map(SectionRecord::from_section)
            .collect();
        let sections = serde_json::to_string(&sections).map_err(ser)?;
        let key_points = serde_json::to_string(lesson.key_points()).map_err(ser)?;

        sqlx::query(
            r"
            INSERT INTO lessons (topic_id, duration_label, xp_reward, sections, key_points)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(topic_id) DO UPDATE SET
                duration_label = excluded.duration_label,
                xp_reward = excluded.xp_reward,
                sections = excluded.sections,
                key_points = excluded.key_points
            ",
        )
        .bind(u64_to_i64("topic_id", lesson.topic_id().value())?)
        .bind(lesson.duration_label())
        .bind(i64::from(lesson.xp_reward()))
        .bind(sections)
        .bind(key_points)
        .execute(self.pool())
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }

    async fn get_lesson(&self, id: TopicId) -> Result<Lesson, StorageError> {
        let row = sqlx::query(
            r"
            SELECT topic_id, duration_label, xp_reward, sections, key_points
            FROM lessons
            WHERE topic_id = ?1
            ",
        )
        .bind(u64_to_i64("topic_id", id.value())?)
        .fetch_optional(self.pool())
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        row.as_ref().map(map_lesson_row).transpose()?.ok_or(StorageError::NotFound)
    }
}
