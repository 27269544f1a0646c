use thiserror::Error;

use crate::model::{CategoryError, DayStatusError, ParseIdError, QuestionError, ThemeParseError};

/// Any domain validation failure.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Category(#[from] CategoryError),
    #[error(transparent)]
    DayStatus(#[from] DayStatusError),
    #[error(transparent)]
    Id(#[from] ParseIdError),
    #[error(transparent)]
    Theme(#[from] ThemeParseError),
}
