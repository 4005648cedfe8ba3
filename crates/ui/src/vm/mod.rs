mod markdown;
mod quiz_vm;
mod report_vm;
mod time_fmt;

pub use markdown::markdown_to_safe_html;
pub use quiz_vm::{QuizIntent, QuizVm, mode_title, start_quiz};
pub use report_vm::{ReportVm, ReviewRowVm, map_report, map_review_rows};
pub use time_fmt::{format_countdown, format_datetime};
