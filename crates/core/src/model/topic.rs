use thiserror::Error;

use crate::model::ids::TopicId;

/// A study topic: one node in the learning path and the unit questions are
/// filtered by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    id: TopicId,
    name: String,
    category: String,
    summary: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TopicError {
    #[error("topic name is blank")]
    BlankName,

    #[error("topic category is blank")]
    BlankCategory,
}

impl Topic {
    /// # Errors
    ///
    /// Returns `TopicError` if the name or category is blank.
    pub fn new(
        id: TopicId,
        name: impl Into<String>,
        category: impl Into<String>,
        summary: impl Into<String>,
    ) -> Result<Self, TopicError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(TopicError::BlankName);
        }
        let category = category.into().trim().to_string();
        if category.is_empty() {
            return Err(TopicError::BlankCategory);
        }
        Ok(Self {
            id,
            name,
            category,
            summary: summary.into().trim().to_string(),
        })
    }

    #[must_use]
    pub fn id(&self) -> TopicId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_topic() {
        let topic = Topic::new(
            TopicId::new(1),
            "Road Signs",
            "Essential",
            "Warning, regulatory and information signs.",
        )
        .unwrap();
        assert_eq!(topic.name(), "Road Signs");
        assert_eq!(topic.category(), "Essential");
    }

    #[test]
    fn rejects_blank_name() {
        let err = Topic::new(TopicId::new(1), "  ", "Essential", "").unwrap_err();
        assert!(matches!(err, TopicError::BlankName));
    }
}
