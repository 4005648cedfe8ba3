use thiserror::Error;
use url::Url;

use crate::model::ids::{QuestionId, TopicId};

//
// ─── IMAGE REFERENCE ───────────────────────────────────────────────────────────
//

/// Reference to an illustration shown with a question (a road-sign plate,
/// an intersection diagram). Either an absolute URL or a relative asset path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef(String);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ImageRefError {
    #[error("image reference is empty")]
    Empty,

    #[error("invalid image URL: {raw}")]
    InvalidUrl { raw: String },
}

impl ImageRef {
    /// Validate a raw reference. Absolute references must parse as URLs;
    /// anything else is treated as a relative asset path.
    ///
    /// # Errors
    ///
    /// Returns `ImageRefError` if the reference is blank or an unparsable URL.
    pub fn new(raw: impl Into<String>) -> Result<Self, ImageRefError> {
        let raw = raw.into().trim().to_string();
        if raw.is_empty() {
            return Err(ImageRefError::Empty);
        }
        if raw.contains("://") && Url::parse(&raw).is_err() {
            return Err(ImageRefError::InvalidUrl { raw });
        }
        Ok(Self(raw))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// Unvalidated question data, as it arrives from storage or seeding.
#[derive(Debug, Clone, Default)]
pub struct QuestionDraft {
    pub prompt: String,
    pub image: Option<String>,
    pub options: Vec<String>,
    pub correct_option: usize,
    pub explanation: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt is blank")]
    BlankPrompt,

    #[error("question needs at least two options, got {got}")]
    TooFewOptions { got: usize },

    #[error("option {index} is blank")]
    BlankOption { index: usize },

    #[error("correct option {correct} is out of range for {options} options")]
    CorrectOptionOutOfRange { correct: usize, options: usize },

    #[error("question explanation is blank")]
    BlankExplanation,

    #[error(transparent)]
    Image(#[from] ImageRefError),
}

impl QuestionDraft {
    /// Validate the draft into a domain `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` for a blank prompt or explanation, fewer than
    /// two options, a blank option, an out-of-range correct index, or an
    /// invalid image reference.
    pub fn validate(self, id: QuestionId, topic_id: TopicId) -> Result<Question, QuestionError> {
        let prompt = self.prompt.trim().to_string();
        if prompt.is_empty() {
            return Err(QuestionError::BlankPrompt);
        }

        if self.options.len() < 2 {
            return Err(QuestionError::TooFewOptions {
                got: self.options.len(),
            });
        }
        let mut options = Vec::with_capacity(self.options.len());
        for (index, option) in self.options.into_iter().enumerate() {
            let option = option.trim().to_string();
            if option.is_empty() {
                return Err(QuestionError::BlankOption { index });
            }
            options.push(option);
        }

        if self.correct_option >= options.len() {
            return Err(QuestionError::CorrectOptionOutOfRange {
                correct: self.correct_option,
                options: options.len(),
            });
        }

        let explanation = self.explanation.trim().to_string();
        if explanation.is_empty() {
            return Err(QuestionError::BlankExplanation);
        }

        let image = self.image.map(ImageRef::new).transpose()?;

        Ok(Question {
            id,
            topic_id,
            prompt,
            image,
            options,
            correct_option: self.correct_option,
            explanation,
        })
    }
}

/// A validated multiple-choice question.
///
/// Invariant: `correct_option` always indexes into `options`, and `options`
/// holds at least two entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    topic_id: TopicId,
    prompt: String,
    image: Option<ImageRef>,
    options: Vec<String>,
    correct_option: usize,
    explanation: String,
}

impl Question {
    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn topic_id(&self) -> TopicId {
        self.topic_id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn image(&self) -> Option<&ImageRef> {
        self.image.as_ref()
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn correct_option(&self) -> usize {
        self.correct_option
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    /// True if the given selection matches the correct option.
    #[must_use]
    pub fn is_correct(&self, selection: usize) -> bool {
        selection == self.correct_option
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> QuestionDraft {
        QuestionDraft {
            prompt: "What is the general speed limit in an urban area?".into(),
            image: None,
            options: vec!["60 km/h".into(), "80 km/h".into(), "100 km/h".into()],
            correct_option: 0,
            explanation: "Unless a sign shows otherwise, the urban limit is 60 km/h.".into(),
        }
    }

    #[test]
    fn valid_draft_builds_question() {
        let question = draft()
            .validate(QuestionId::new(1), TopicId::new(1))
            .unwrap();
        assert_eq!(question.option_count(), 3);
        assert!(question.is_correct(0));
        assert!(!question.is_correct(1));
    }

    #[test]
    fn rejects_blank_prompt() {
        let mut d = draft();
        d.prompt = "   ".into();
        let err = d.validate(QuestionId::new(1), TopicId::new(1)).unwrap_err();
        assert!(matches!(err, QuestionError::BlankPrompt));
    }

    #[test]
    fn rejects_single_option() {
        let mut d = draft();
        d.options = vec!["only one".into()];
        let err = d.validate(QuestionId::new(1), TopicId::new(1)).unwrap_err();
        assert!(matches!(err, QuestionError::TooFewOptions { got: 1 }));
    }

    #[test]
    fn rejects_out_of_range_correct_option() {
        let mut d = draft();
        d.correct_option = 3;
        let err = d.validate(QuestionId::new(1), TopicId::new(1)).unwrap_err();
        assert!(matches!(
            err,
            QuestionError::CorrectOptionOutOfRange {
                correct: 3,
                options: 3
            }
        ));
    }

    #[test]
    fn rejects_blank_explanation() {
        let mut d = draft();
        d.explanation = String::new();
        let err = d.validate(QuestionId::new(1), TopicId::new(1)).unwrap_err();
        assert!(matches!(err, QuestionError::BlankExplanation));
    }

    #[test]
    fn image_ref_accepts_relative_path_and_url() {
        assert!(ImageRef::new("signs/stop.png").is_ok());
        assert!(ImageRef::new("https://example.org/stop.png").is_ok());
        assert!(matches!(
            ImageRef::new("   ").unwrap_err(),
            ImageRefError::Empty
        ));
        assert!(matches!(
            ImageRef::new("http://[bad").unwrap_err(),
            ImageRefError::InvalidUrl { .. }
        ));
    }
}
