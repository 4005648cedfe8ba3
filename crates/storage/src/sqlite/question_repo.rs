use async_trait::async_trait;
use sqlx::Row;

use k53_core::model::{Question, TopicId};

use crate::repository::{
    QuestionCriteria, QuestionRecord, QuestionRepository, StorageError,
};

use super::SqliteRepository;
use super::mapping::{map_question_row, ser, u64_to_i64};

#[async_trait]
impl QuestionRepository for SqliteRepository {
    async fn upsert_question(&self, question: &Question) -> Result<(), StorageError> {
        let record = QuestionRecord::from_question(question);
        let options = serde_json::to_string(&record.options).map_err(ser)?;

        sqlx::query(
            r"
            INSERT INTO questions (id, topic_id, prompt, image, options, correct_option, explanation)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(id) DO UPDATE SET
                topic_id = excluded.topic_id,
                prompt = excluded.prompt,
                image = excluded.image,
                options = excluded.options,
                correct_option = excluded.correct_option,
                explanation = excluded.explanation
            ",
        )
        .bind(u64_to_i64("question_id", record.id)?)
        .bind(u64_to_i64("topic_id", record.topic_id)?)
        .bind(&record.prompt)
        .bind(&record.image)
        .bind(options)
        .bind(i64::try_from(record.correct_option).map_err(ser)?)
        .bind(&record.explanation)
        .execute(self.pool())
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }

    async fn fetch_set(&self, criteria: &QuestionCriteria) -> Result<Vec<Question>, StorageError> {
        // Two shapes instead of dynamic SQL; the bank is small and the
        // criteria surface is fixed.
        let rows = match criteria.topic {
            Some(topic) => {
                sqlx::query(
                    r"
                    SELECT id, topic_id, prompt, image, options, correct_option, explanation
                    FROM questions
                    WHERE topic_id = ?1
                    ORDER BY id
                    LIMIT ?2
                    ",
                )
                .bind(u64_to_i64("topic_id", topic.value())?)
                .bind(limit_to_i64(criteria.limit))
                .fetch_all(self.pool())
                .await
            }
            None => {
                sqlx::query(
                    r"
                    SELECT id, topic_id, prompt, image, options, correct_option, explanation
                    FROM questions
                    ORDER BY id
                    LIMIT ?1
                    ",
                )
                .bind(limit_to_i64(criteria.limit))
                .fetch_all(self.pool())
                .await
            }
        }
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        rows.iter().map(map_question_row).collect()
    }

    async fn count_questions(&self, topic: Option<TopicId>) -> Result<u64, StorageError> {
        let row = match topic {
            Some(topic) => {
                sqlx::query("SELECT COUNT(*) AS n FROM questions WHERE topic_id = ?1")
                    .bind(u64_to_i64("topic_id", topic.value())?)
                    .fetch_one(self.pool())
                    .await
            }
            None => {
                sqlx::query("SELECT COUNT(*) AS n FROM questions")
                    .fetch_one(self.pool())
                    .await
            }
        }
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        let n: i64 = row.try_get("n").map_err(ser)?;
        u64::try_from(n).map_err(|_| StorageError::Serialization(format!("invalid count: {n}")))
    }
}

/// SQLite treats a negative LIMIT as "no limit".
fn limit_to_i64(limit: Option<u32>) -> i64 {
    limit.map_or(-1, i64::from)
}
