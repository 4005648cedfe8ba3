use thiserror::Error;

use crate::model::ids::TopicId;

/// One titled block of lesson text. Paragraphs are markdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonSection {
    pub title: String,
    pub paragraphs: Vec<String>,
}

/// Study material for a topic, shown by the lesson browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    topic_id: TopicId,
    duration_label: String,
    xp_reward: u32,
    sections: Vec<LessonSection>,
    key_points: Vec<String>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LessonContentError {
    #[error("lesson has no sections")]
    NoSections,

    #[error("lesson section {index} has a blank title")]
    BlankSectionTitle { index: usize },
}

impl Lesson {
    /// # Errors
    ///
    /// Returns `LessonContentError` if there are no sections or a section
    /// title is blank.
    pub fn new(
        topic_id: TopicId,
        duration_label: impl Into<String>,
        xp_reward: u32,
        sections: Vec<LessonSection>,
        key_points: Vec<String>,
    ) -> Result<Self, LessonContentError> {
        if sections.is_empty() {
            return Err(LessonContentError::NoSections);
        }
        for (index, section) in sections.iter().enumerate() {
            if section.title.trim().is_empty() {
                return Err(LessonContentError::BlankSectionTitle { index });
            }
        }
        Ok(Self {
            topic_id,
            duration_label: duration_label.into(),
            xp_reward,
            sections,
            key_points,
        })
    }

    #[must_use]
    pub fn topic_id(&self) -> TopicId {
        self.topic_id
    }

    #[must_use]
    pub fn duration_label(&self) -> &str {
        &self.duration_label
    }

    #[must_use]
    pub fn xp_reward(&self) -> u32 {
        self.xp_reward
    }

    #[must_use]
    pub fn sections(&self) -> &[LessonSection] {
        &self.sections
    }

    #[must_use]
    pub fn key_points(&self) -> &[String] {
        &self.key_points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_lesson() {
        let err = Lesson::new(TopicId::new(1), "10 min", 50, Vec::new(), Vec::new()).unwrap_err();
        assert!(matches!(err, LessonContentError::NoSections));
    }

    #[test]
    fn builds_lesson() {
        let lesson = Lesson::new(
            TopicId::new(1),
            "15 min",
            50,
            vec![LessonSection {
                title: "Types of signs".into(),
                paragraphs: vec!["Warning signs are triangular.".into()],
            }],
            vec!["Triangular signs warn.".into()],
        )
        .unwrap();
        assert_eq!(lesson.sections().len(), 1);
        assert_eq!(lesson.xp_reward(), 50);
    }
}
