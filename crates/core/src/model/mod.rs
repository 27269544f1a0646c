mod category;
mod ids;
mod progress;
mod question;
mod theme;
mod user;

pub use ids::{Day, ParseIdError, QuestionId, UserId};

pub use category::{Category, CategoryError, CategoryFilter};
pub use progress::{DayStatus, DayStatusError, ProgressMap};
pub use question::{Difficulty, Question, QuestionDraft, QuestionError};
pub use theme::{Theme, ThemeParseError};
pub use user::{AuthSession, User};
