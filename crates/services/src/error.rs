//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;

/// Errors emitted by `QuizLoopService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("no questions available for session")]
    Empty,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `LessonService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LessonError {
    #[error("no lesson for that topic")]
    NotFound,
    #[error(transparent)]
    Storage(StorageError),
}

impl From<StorageError> for LessonError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound => LessonError::NotFound,
            other => LessonError::Storage(other),
        }
    }
}

/// Errors emitted by `PreferencesService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PreferencesError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}
