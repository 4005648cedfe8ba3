mod home;
mod learning_path;
mod lesson;
mod not_found;
mod practice;
mod profile;
mod quiz;
mod results;
mod review;
mod state;

pub use home::HomeView;
pub use learning_path::LearningPathView;
pub use lesson::LessonView;
pub use not_found::NotFoundView;
pub use practice::PracticeView;
pub use profile::ProfileView;
pub use quiz::QuizView;
pub use results::ResultsView;
pub use review::ReviewView;
pub use state::{ViewError, ViewState, view_state_from_resource};
