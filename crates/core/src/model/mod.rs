mod ids;
mod lesson;
mod preferences;
mod question;
mod report;
mod topic;

pub use ids::{ParseIdError, QuestionId, TopicId};
pub use lesson::{Lesson, LessonContentError, LessonSection};
pub use preferences::Preferences;
pub use question::{ImageRef, ImageRefError, Question, QuestionDraft, QuestionError};
pub use report::{ParseModeError, ReportError, SessionMode, TestReport, pass_mark};
pub use topic::{Topic, TopicError};
