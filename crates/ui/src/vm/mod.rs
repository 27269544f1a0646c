mod auth_vm;
mod calendar_vm;
mod nav_vm;
mod quiz_vm;
mod stats_vm;

pub use auth_vm::{AuthFormVm, AuthMode, AuthStep, AuthSubmission, CONFIRM_EMAIL_NOTICE};
pub use calendar_vm::{CalendarCellVm, CalendarVm, WEEK_LEN};
pub use nav_vm::{NavVm, Tab, UserBadgeVm};
pub use quiz_vm::{OptionStyle, OptionVm, QuizCardVm, QuizPhase};
pub use stats_vm::{CategoryRowVm, StatsVm};
