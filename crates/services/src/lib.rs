#![forbid(unsafe_code)]

pub mod error;
pub mod lesson_service;
pub mod preferences_service;
pub mod quiz_loop;
pub mod sound;

pub use k53_core::Clock;

pub use error::{LessonError, PreferencesError, QuizError};
pub use lesson_service::{LearningPathNode, LessonService};
pub use preferences_service::PreferencesService;
pub use quiz_loop::QuizLoopService;
pub use sound::{NullSoundPlayer, SoundPlayer};
