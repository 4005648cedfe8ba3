use std::sync::{Arc, Mutex};

use k53_core::model::TestReport;
use services::{LessonService, PreferencesService, QuizLoopService};

/// What the composition root (`crates/app`) must provide to the views.
pub trait UiApp: Send + Sync {
    fn quiz_loop(&self) -> Arc<QuizLoopService>;
    fn lessons(&self) -> Arc<LessonService>;
    fn preferences(&self) -> Arc<PreferencesService>;
}

/// One-shot carrier for the report a finished session hands to the results
/// and review screens. Never persisted; cleared whenever a new session
/// starts.
#[derive(Clone, Default)]
pub struct ReportHandoff {
    slot: Arc<Mutex<Option<TestReport>>>,
}

impl ReportHandoff {
    pub fn publish(&self, report: TestReport) {
        if let Ok(mut guard) = self.slot.lock() {
            *guard = Some(report);
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<TestReport> {
        self.slot.lock().ok().and_then(|guard| guard.clone())
    }

    pub fn clear(&self) {
        if let Ok(mut guard) = self.slot.lock() {
            *guard = None;
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    quiz_loop: Arc<QuizLoopService>,
    lessons: Arc<LessonService>,
    preferences: Arc<PreferencesService>,
    report: ReportHandoff,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            quiz_loop: app.quiz_loop(),
            lessons: app.lessons(),
            preferences: app.preferences(),
            report: ReportHandoff::default(),
        }
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    #[must_use]
    pub fn lessons(&self) -> Arc<LessonService> {
        Arc::clone(&self.lessons)
    }

    #[must_use]
    pub fn preferences(&self) -> Arc<PreferencesService> {
        Arc::clone(&self.preferences)
    }

    #[must_use]
    pub fn report_handoff(&self) -> ReportHandoff {
        self.report.clone()
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
