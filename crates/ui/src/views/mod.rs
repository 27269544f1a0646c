mod auth;
mod calendar;
mod navbar;
mod quiz;
mod state;
mod stats;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use auth::AuthView;
pub use calendar::CalendarView;
pub use navbar::{Navbar, UserBadge};
pub use quiz::QuizView;
pub use state::{ErrorNotice, ViewError, ViewState, view_error, view_state_from_resource};
pub use stats::StatsView;
