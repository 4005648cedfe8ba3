#![forbid(unsafe_code)]

pub mod repository;
pub mod seed;
pub mod sqlite;

pub use repository::{
    InMemoryRepository, PreferencesRepository, QuestionCriteria, QuestionRepository, Storage,
    StorageError, TopicRepository,
};
pub use sqlite::{SqliteInitError, SqliteRepository};
