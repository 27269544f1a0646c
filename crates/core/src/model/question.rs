use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::category::Category;
use crate::model::ids::{Day, QuestionId};
use crate::model::progress::DayStatus;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question title cannot be empty")]
    EmptyTitle,

    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("day must be >= 1")]
    InvalidDay,

    #[error("correct option {index} is out of range for {len} options")]
    CorrectOptionOutOfRange { index: usize, len: usize },

    #[error("option {0} does not exist")]
    UnknownOption(usize),
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }
}

//
// ─── QUESTION TYPES ────────────────────────────────────────────────────────────
//

/// Unvalidated question fields, as gathered from the catalog or a wire row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub id: QuestionId,
    pub day: Day,
    pub title: String,
    pub category: Category,
    pub prompt: String,
    pub solution: String,
    pub description: Option<String>,
    pub options: Vec<String>,
    pub correct_option: Option<usize>,
    pub difficulty: Option<Difficulty>,
}

impl QuestionDraft {
    /// Minimal draft for a reveal-only question.
    #[must_use]
    pub fn new(
        id: QuestionId,
        day: Day,
        title: impl Into<String>,
        category: Category,
        prompt: impl Into<String>,
        solution: impl Into<String>,
    ) -> Self {
        Self {
            id,
            day,
            title: title.into(),
            category,
            prompt: prompt.into(),
            solution: solution.into(),
            description: None,
            options: Vec::new(),
            correct_option: None,
            difficulty: None,
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: Vec<String>, correct_option: usize) -> Self {
        self.options = options;
        self.correct_option = Some(correct_option);
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    /// Validate and normalize the draft.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the title or prompt is blank, the day is
    /// zero, or the correct option does not index into `options`.
    pub fn validate(self) -> Result<Question, QuestionError> {
        let title = self.title.trim().to_owned();
        if title.is_empty() {
            return Err(QuestionError::EmptyTitle);
        }
        let prompt = self.prompt.trim().to_owned();
        if prompt.is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if self.day.value() == 0 {
            return Err(QuestionError::InvalidDay);
        }
        if let Some(index) = self.correct_option {
            if index >= self.options.len() {
                return Err(QuestionError::CorrectOptionOutOfRange {
                    index,
                    len: self.options.len(),
                });
            }
        }

        let description = self
            .description
            .map(|text| text.trim().to_owned())
            .filter(|text| !text.is_empty());

        Ok(Question {
            id: self.id,
            day: self.day,
            title,
            category: self.category,
            prompt,
            solution: self.solution.trim().to_owned(),
            description,
            options: self.options,
            correct_option: self.correct_option,
            difficulty: self.difficulty,
        })
    }
}

/// Canonical quiz item. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,
    day: Day,
    title: String,
    category: Category,
    prompt: String,
    solution: String,
    description: Option<String>,
    options: Vec<String>,
    correct_option: Option<usize>,
    difficulty: Option<Difficulty>,
}

impl Question {
    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn day(&self) -> Day {
        self.day
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn category(&self) -> &Category {
        &self.category
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn solution(&self) -> &str {
        &self.solution
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_option(&self) -> Option<usize> {
        self.correct_option
    }

    #[must_use]
    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    /// True when the question is graded by picking one of `options`.
    #[must_use]
    pub fn is_multiple_choice(&self) -> bool {
        self.correct_option.is_some()
    }

    /// Status recorded when the answer is revealed.
    ///
    /// Multiple-choice questions record `Correct` iff `selected` equals the
    /// stored correct index and `Incorrect` otherwise (including revealing
    /// without a selection). Reveal-only questions record `Completed`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::UnknownOption` if `selected` is outside `options`.
    pub fn grade(&self, selected: Option<usize>) -> Result<DayStatus, QuestionError> {
        if let Some(index) = selected {
            if index >= self.options.len() {
                return Err(QuestionError::UnknownOption(index));
            }
        }
        match (self.correct_option, selected) {
            (Some(correct), Some(index)) if correct == index => Ok(DayStatus::Correct),
            (Some(_), _) => Ok(DayStatus::Incorrect),
            (None, _) => Ok(DayStatus::Completed),
        }
    }

    /// Replace the identifier, keeping everything else.
    #[must_use]
    pub fn with_id(mut self, id: QuestionId) -> Self {
        self.id = id;
        self
    }

    /// Replace the day index, keeping everything else.
    #[must_use]
    pub fn with_day(mut self, day: Day) -> Self {
        self.day = day;
        self
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> QuestionDraft {
        QuestionDraft::new(
            QuestionId::new("preflop-1"),
            Day::new(1),
            "Facing an UTG open",
            Category::preflop(),
            "You hold AKs on the button. UTG opens to 3bb.",
            "3-bet to 12bb.",
        )
    }

    fn options() -> Vec<String> {
        vec!["Fold".into(), "Call".into(), "3-bet 9bb".into(), "3-bet 12bb".into()]
    }

    #[test]
    fn question_fails_if_title_empty() {
        let mut d = draft();
        d.title = "   ".into();
        assert_eq!(d.validate().unwrap_err(), QuestionError::EmptyTitle);
    }

    #[test]
    fn question_fails_if_prompt_empty() {
        let mut d = draft();
        d.prompt = String::new();
        assert_eq!(d.validate().unwrap_err(), QuestionError::EmptyPrompt);
    }

    #[test]
    fn question_fails_on_day_zero() {
        let mut d = draft();
        d.day = Day::new(0);
        assert_eq!(d.validate().unwrap_err(), QuestionError::InvalidDay);
    }

    #[test]
    fn correct_option_must_index_options() {
        let err = draft().with_options(options(), 4).validate().unwrap_err();
        assert_eq!(
            err,
            QuestionError::CorrectOptionOutOfRange { index: 4, len: 4 }
        );
    }

    #[test]
    fn grade_records_correct_only_on_matching_index() {
        let question = draft().with_options(options(), 3).validate().unwrap();
        assert_eq!(question.grade(Some(3)).unwrap(), DayStatus::Correct);
        for wrong in 0..3 {
            assert_eq!(question.grade(Some(wrong)).unwrap(), DayStatus::Incorrect);
        }
    }

    #[test]
    fn reveal_without_selection_is_incorrect() {
        let question = draft().with_options(options(), 3).validate().unwrap();
        assert_eq!(question.grade(None).unwrap(), DayStatus::Incorrect);
    }

    #[test]
    fn grade_rejects_unknown_option() {
        let question = draft().with_options(options(), 3).validate().unwrap();
        assert_eq!(
            question.grade(Some(9)).unwrap_err(),
            QuestionError::UnknownOption(9)
        );
    }

    #[test]
    fn reveal_only_question_records_completed() {
        let question = draft().validate().unwrap();
        assert!(!question.is_multiple_choice());
        assert_eq!(question.grade(None).unwrap(), DayStatus::Completed);
    }

    #[test]
    fn blank_description_is_dropped() {
        let question = draft().with_description("  ").validate().unwrap();
        assert_eq!(question.description(), None);
    }
}
