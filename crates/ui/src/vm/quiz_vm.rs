use quiz_core::model::{Day, DayStatus, Question};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizPhase {
    Unanswered,
    AnswerRevealed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionStyle {
    Neutral,
    Selected,
    Correct,
    Wrong,
}

impl OptionStyle {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            OptionStyle::Neutral => "option",
            OptionStyle::Selected => "option option--selected",
            OptionStyle::Correct => "option option--correct",
            OptionStyle::Wrong => "option option--wrong",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub index: usize,
    pub letter: char,
    pub label: String,
    pub style: OptionStyle,
}

/// One quiz item as shown on the card.
///
/// The card starts `Unanswered` every time it is opened; `reveal` is the
/// only transition and it cannot be undone.
#[derive(Clone, Debug, PartialEq)]
pub struct QuizCardVm {
    question: Question,
    phase: QuizPhase,
    selected: Option<usize>,
    previous: Option<DayStatus>,
}

impl QuizCardVm {
    #[must_use]
    pub fn new(question: Question, previous: Option<DayStatus>) -> Self {
        Self {
            question,
            phase: QuizPhase::Unanswered,
            selected: None,
            previous,
        }
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    #[must_use]
    pub fn question(&self) -> &Question {
        &self.question
    }

    #[must_use]
    pub fn day(&self) -> Day {
        self.question.day()
    }

    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn title(&self) -> &str {
        self.question.title()
    }

    #[must_use]
    pub fn prompt_text(&self) -> &str {
        self.question.prompt()
    }

    #[must_use]
    pub fn category_label(&self) -> &str {
        self.question.category().display_label()
    }

    #[must_use]
    pub fn difficulty_label(&self) -> Option<&'static str> {
        self.question.difficulty().map(|d| d.label())
    }

    /// Solution text, hidden until the answer is revealed.
    #[must_use]
    pub fn solution_text(&self) -> Option<&str> {
        match self.phase {
            QuizPhase::AnswerRevealed => Some(self.question.solution()),
            QuizPhase::Unanswered => None,
        }
    }

    /// Status stored before this card was opened.
    #[must_use]
    pub fn previous_status(&self) -> Option<DayStatus> {
        self.previous
    }

    /// Verdict for option questions once revealed.
    #[must_use]
    pub fn verdict(&self) -> Option<bool> {
        if self.phase != QuizPhase::AnswerRevealed {
            return None;
        }
        let correct = self.question.correct_option()?;
        Some(self.selected == Some(correct))
    }

    /// Pick an option. Ignored after reveal, on reveal-only items, and for
    /// out-of-range indices.
    pub fn select(&mut self, index: usize) -> bool {
        if self.phase != QuizPhase::Unanswered
            || !self.question.is_multiple_choice()
            || index >= self.question.options().len()
        {
            return false;
        }
        self.selected = Some(index);
        true
    }

    #[must_use]
    pub fn can_reveal(&self) -> bool {
        self.phase == QuizPhase::Unanswered
            && (!self.question.is_multiple_choice() || self.selected.is_some())
    }

    /// Move to `AnswerRevealed` and return the status to record.
    ///
    /// Returns `None` when the card cannot be revealed yet (or already was).
    pub fn reveal(&mut self) -> Option<DayStatus> {
        if !self.can_reveal() {
            return None;
        }
        let status = self.question.grade(self.selected).ok()?;
        self.phase = QuizPhase::AnswerRevealed;
        Some(status)
    }

    #[must_use]
    pub fn options(&self) -> Vec<OptionVm> {
        let correct = self.question.correct_option();
        self.question
            .options()
            .iter()
            .enumerate()
            .map(|(index, label)| {
                let style = match self.phase {
                    QuizPhase::Unanswered if self.selected == Some(index) => OptionStyle::Selected,
                    QuizPhase::Unanswered => OptionStyle::Neutral,
                    QuizPhase::AnswerRevealed if correct == Some(index) => OptionStyle::Correct,
                    QuizPhase::AnswerRevealed if self.selected == Some(index) => OptionStyle::Wrong,
                    QuizPhase::AnswerRevealed => OptionStyle::Neutral,
                };
                OptionVm {
                    index,
                    letter: option_letter(index),
                    label: label.clone(),
                    style,
                }
            })
            .collect()
    }
}

fn option_letter(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .filter(|i| *i < 26)
        .map_or('?', |i| char::from(b'A' + i))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{Category, QuestionDraft, QuestionId};

    fn option_question() -> Question {
        QuestionDraft::new(
            QuestionId::new("preflop-1"),
            Day::new(3),
            "UTG open",
            Category::preflop(),
            "Which hand opens?",
            "AJo is a standard open.",
        )
        .with_options(vec!["72o".into(), "AJo".into(), "J4s".into()], 1)
        .validate()
        .unwrap()
    }

    fn reveal_only_question() -> Question {
        QuestionDraft::new(
            QuestionId::new("bubble-1"),
            Day::new(4),
            "Bubble",
            Category::new("bubble").unwrap(),
            "You cover the table.",
            "Shove wide.",
        )
        .validate()
        .unwrap()
    }

    #[test]
    fn option_question_needs_selection_before_reveal() {
        let mut vm = QuizCardVm::new(option_question(), None);
        assert!(!vm.can_reveal());
        assert_eq!(vm.reveal(), None);
        assert_eq!(vm.phase(), QuizPhase::Unanswered);
        assert_eq!(vm.solution_text(), None);
    }

    #[test]
    fn correct_pick_records_correct() {
        let mut vm = QuizCardVm::new(option_question(), None);
        assert!(vm.select(1));
        assert_eq!(vm.reveal(), Some(DayStatus::Correct));
        assert_eq!(vm.phase(), QuizPhase::AnswerRevealed);
        assert_eq!(vm.verdict(), Some(true));
        assert_eq!(vm.solution_text(), Some("AJo is a standard open."));
    }

    #[test]
    fn wrong_pick_records_incorrect_and_styles_both() {
        let mut vm = QuizCardVm::new(option_question(), None);
        vm.select(0);
        assert_eq!(vm.options()[0].style, OptionStyle::Selected);

        assert_eq!(vm.reveal(), Some(DayStatus::Incorrect));
        let styles: Vec<_> = vm.options().into_iter().map(|o| o.style).collect();
        assert_eq!(
            styles,
            vec![OptionStyle::Wrong, OptionStyle::Correct, OptionStyle::Neutral]
        );
        assert_eq!(vm.verdict(), Some(false));
    }

    #[test]
    fn revealed_card_is_terminal() {
        let mut vm = QuizCardVm::new(option_question(), None);
        vm.select(1);
        vm.reveal();
        assert!(!vm.select(0));
        assert_eq!(vm.selected(), Some(1));
        assert_eq!(vm.reveal(), None);
    }

    #[test]
    fn reveal_only_question_completes() {
        let mut vm = QuizCardVm::new(reveal_only_question(), Some(DayStatus::Completed));
        assert!(!vm.select(0));
        assert!(vm.can_reveal());
        assert_eq!(vm.reveal(), Some(DayStatus::Completed));
        assert_eq!(vm.verdict(), None);
        assert!(vm.options().is_empty());
    }

    #[test]
    fn reopening_resets_display_but_keeps_previous_status() {
        let vm = QuizCardVm::new(option_question(), Some(DayStatus::Incorrect));
        assert_eq!(vm.phase(), QuizPhase::Unanswered);
        assert_eq!(vm.selected(), None);
        assert_eq!(vm.previous_status(), Some(DayStatus::Incorrect));
    }

    #[test]
    fn options_are_lettered() {
        let vm = QuizCardVm::new(option_question(), None);
        let letters: String = vm.options().iter().map(|o| o.letter).collect();
        assert_eq!(letters, "ABC");
    }
}
