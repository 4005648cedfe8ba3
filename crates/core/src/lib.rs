#![forbid(unsafe_code)]

pub mod model;
pub mod session;
pub mod time;

pub use model::{
    ImageRef, Lesson, LessonSection, Preferences, Question, QuestionDraft, QuestionId,
    SessionMode, TestReport, Topic, TopicId,
};
pub use session::{Phase, QuizSession, SessionError, TimerBand, Transition};
pub use time::Clock;
