use k53_core::model::{Lesson, Question, Topic, TopicId};
use sqlx::Row;

use crate::repository::{QuestionRecord, SectionRecord, StorageError};

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn i64_to_u64(field: &'static str, v: i64) -> Result<u64, StorageError> {
    u64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} sign overflow")))
}

pub(crate) fn u64_to_i64(field: &'static str, v: u64) -> Result<i64, StorageError> {
    i64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} overflow")))
}

pub(crate) fn topic_id_from_i64(v: i64) -> Result<TopicId, StorageError> {
    Ok(TopicId::new(i64_to_u64("topic_id", v)?))
}

pub(crate) fn map_question_row(row: &sqlx::sqlite::SqliteRow) -> Result<Question, StorageError> {
    let options_json: String = row.try_get("options").map_err(ser)?;
    let options: Vec<String> = serde_json::from_str(&options_json).map_err(ser)?;

    let correct_i64: i64 = row.try_get("correct_option").map_err(ser)?;
    let correct_option = usize::try_from(correct_i64)
        .map_err(|_| StorageError::Serialization(format!("invalid correct_option: {correct_i64}")))?;

    let record = QuestionRecord {
        id: i64_to_u64("question_id", row.try_get::<i64, _>("id").map_err(ser)?)?,
        topic_id: i64_to_u64("topic_id", row.try_get::<i64, _>("topic_id").map_err(ser)?)?,
        prompt: row.try_get("prompt").map_err(ser)?,
        image: row.try_get("image").map_err(ser)?,
        options,
        correct_option,
        explanation: row.try_get("explanation").map_err(ser)?,
    };
    record.into_question().map_err(ser)
}

pub(crate) fn map_topic_row(row: &sqlx::sqlite::SqliteRow) -> Result<Topic, StorageError> {
    Topic::new(
        topic_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        row.try_get::<String, _>("name").map_err(ser)?,
        row.try_get::<String, _>("category").map_err(ser)?,
        row.try_get::<String, _>("summary").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) fn map_lesson_row(row: &sqlx::sqlite::SqliteRow) -> Result<Lesson, StorageError> {
    let topic_id = topic_id_from_i64(row.try_get::<i64, _>("topic_id").map_err(ser)?)?;

    let sections_json: String = row.try_get("sections").map_err(ser)?;
    let sections: Vec<SectionRecord> = serde_json::from_str(&sections_json).map_err(ser)?;

    let key_points_json: String = row.try_get("key_points").map_err(ser)?;
    let key_points: Vec<String> = serde_json::from_str(&key_points_json).map_err(ser)?;

    let xp_i64: i64 = row.try_get("xp_reward").map_err(ser)?;
    let xp_reward = u32::try_from(xp_i64)
        .map_err(|_| StorageError::Serialization(format!("invalid xp_reward: {xp_i64}")))?;

    Lesson::new(
        topic_id,
        row.try_get::<String, _>("duration_label").map_err(ser)?,
        xp_reward,
        sections
            .into_iter()
            .map(SectionRecord::into_section)
            .collect(),
        key_points,
    )
    .map_err(ser)
}
