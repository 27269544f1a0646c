//! Read-only question collections.
//!
//! `QuestionCatalog::builtin()` is the embedded deck used when the remote
//! backend has no questions (or is unreachable). Remote results are wrapped
//! with `QuestionCatalog::new` so every view reads the same type.

use crate::model::{Category, CategoryFilter, Day, Difficulty, Question, QuestionDraft, QuestionId};

/// Navigation direction inside a filtered question list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
}

impl QuestionCatalog {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// Embedded tournament deck, numbered day 1..=N in deck order.
    #[must_use]
    pub fn builtin() -> Self {
        let questions = builtin_drafts()
            .into_iter()
            .zip(1u32..)
            .filter_map(|(mut draft, day)| {
                draft.day = Day::new(day);
                draft.validate().ok()
            })
            .collect();
        Self { questions }
    }

    #[must_use]
    pub fn all(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn by_category(&self, category: &Category) -> Vec<&Question> {
        self.questions
            .iter()
            .filter(|q| q.category() == category)
            .collect()
    }

    #[must_use]
    pub fn filter(&self, filter: &CategoryFilter) -> Vec<&Question> {
        self.questions
            .iter()
            .filter(|q| filter.matches(q.category()))
            .collect()
    }

    #[must_use]
    pub fn by_day(&self, day: Day) -> Option<&Question> {
        self.questions.iter().find(|q| q.day() == day)
    }

    /// Distinct categories in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        let mut seen: Vec<Category> = Vec::new();
        for question in &self.questions {
            if !seen.contains(question.category()) {
                seen.push(question.category().clone());
            }
        }
        seen
    }

    /// Next or previous question within `filter`, wrapping at either end.
    ///
    /// When `day` is not part of the filtered list the first entry is returned.
    #[must_use]
    pub fn neighbor(
        &self,
        day: Day,
        direction: Direction,
        filter: &CategoryFilter,
    ) -> Option<&Question> {
        let visible = self.filter(filter);
        if visible.is_empty() {
            return None;
        }
        let Some(position) = visible.iter().position(|q| q.day() == day) else {
            return visible.first().copied();
        };
        let len = visible.len();
        let target = match direction {
            Direction::Next => (position + 1) % len,
            Direction::Previous => (position + len - 1) % len,
        };
        visible.get(target).copied()
    }
}

#[allow(clippy::too_many_arguments)]
fn mc(
    id: &str,
    category: Category,
    title: &str,
    prompt: &str,
    options: &[&str],
    correct: usize,
    explanation: &str,
    difficulty: Difficulty,
) -> QuestionDraft {
    QuestionDraft::new(
        QuestionId::new(id),
        Day::new(1),
        title,
        category,
        prompt,
        explanation,
    )
    .with_options(options.iter().map(|o| (*o).to_owned()).collect(), correct)
    .with_difficulty(difficulty)
}

const BET_SIZES: &[&str] = &["Check", "Bet 1/3 pot", "Bet 2/3 pot", "Bet pot"];

fn builtin_drafts() -> Vec<QuestionDraft> {
    vec![
        mc(
            "preflop-1",
            Category::preflop(),
            "Facing an UTG open",
            "You are on the button with A♥K♦. UTG opens to 3bb. What is your action?",
            &["Fold", "Call", "3-bet to 9bb", "3-bet to 12bb"],
            3,
            "AK is a premium hand and you have position. UTG's range is tight, but AK \
             plays well against it, so a 3-bet to 12bb is best.",
            Difficulty::Intermediate,
        ),
        mc(
            "preflop-2",
            Category::preflop(),
            "Calling a short-stack shove",
            "Mid-tournament you hold J♠J♣ in the big blind. UTG (10bb) moves all-in. \
             What is your action?",
            &["Fold", "Call"],
            1,
            "A 10bb UTG shoving range is roughly 88+, AK, AQs. JJ has about 57% equity \
             against it, so calling is clearly profitable.",
            Difficulty::Intermediate,
        ),
        mc(
            "preflop-3",
            Category::preflop(),
            "Facing a 4-bet",
            "You hold Q♥Q♦ in the cutoff. The button opens to 2.5bb, you 3-bet to 8bb \
             and the button 4-bets to 18bb. What is your action?",
            &["Fold", "Call", "5-bet all-in"],
            1,
            "QQ is strong, but the button's 4-bet range contains AA and KK often. \
             Calling keeps dominated hands in and lets you see the flop.",
            Difficulty::Advanced,
        ),
        mc(
            "flop-1",
            Category::flop(),
            "C-bet on a dry board",
            "You open A♠K♣ on the button to 2.5bb and only the big blind calls. The flop \
             is 7♥4♦2♠ and the big blind checks. What is your action?",
            BET_SIZES,
            1,
            "The dry board rarely hits the caller's range. A small 1/3 pot c-bet folds \
             out plenty at low risk.",
            Difficulty::Beginner,
        ),
        mc(
            "flop-2",
            Category::flop(),
            "Overpair on a wet board",
            "You open K♥K♠ from the small blind to 3bb and the big blind calls. The flop \
             is J♥T♥9♦. What is your action?",
            BET_SIZES,
            2,
            "Straight and flush draws are everywhere. Bet 2/3 pot to deny draws the \
             right price while still getting value.",
            Difficulty::Intermediate,
        ),
        mc(
            "turn-1",
            Category::turn(),
            "Turn semi-bluff",
            "You open A♥T♥ on the button and the big blind calls. On K♥7♥3♠ you bet 2/3 \
             pot and get called. The turn is 9♣ and the big blind checks again. What \
             is your action?",
            BET_SIZES,
            2,
            "With the nut flush draw a 2/3 pot semi-bluff folds out weak hands and builds \
             a pot for when you get there.",
            Difficulty::Intermediate,
        ),
        mc(
            "river-1",
            Category::river(),
            "River value bet",
            "You open A♠A♣ in the cutoff and the button calls. You bet 2/3 pot on \
             K♥9♦4♠ and on the 7♣ turn and get called both times. The river is 2♦. \
             What is your action?",
            BET_SIZES,
            2,
            "Aces are still well ahead. A 2/3 pot value bet gets called by Kx and \
             second pair.",
            Difficulty::Intermediate,
        ),
        mc(
            "icm-1",
            Category::icm(),
            "Final-table shove from the small blind",
            "Six left at the final table. You have 10bb in the small blind with A♣T♦ and \
             it folds to you. Payouts are $1000/$600/$400/$300/$200/$100. What is your \
             action?",
            &["Fold", "Min-raise to 2bb", "Shove all-in"],
            2,
            "ATo is strong blind-versus-blind. At 10bb shoving beats min-raising and has \
             the highest EV despite ICM pressure.",
            Difficulty::Advanced,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: &str, day: u32, category: Category) -> Question {
        QuestionDraft::new(
            QuestionId::new(id),
            Day::new(day),
            format!("title {id}"),
            category,
            "prompt",
            "solution",
        )
        .validate()
        .unwrap()
    }

    fn mixed() -> QuestionCatalog {
        QuestionCatalog::new(vec![
            question("p1", 1, Category::preflop()),
            question("f1", 2, Category::flop()),
            question("p2", 3, Category::preflop()),
            question("f2", 4, Category::flop()),
            question("p3", 5, Category::preflop()),
        ])
    }

    fn ids(questions: &[&Question]) -> Vec<String> {
        questions.iter().map(|q| q.id().as_str().to_owned()).collect()
    }

    #[test]
    fn builtin_numbers_days_in_order() {
        let catalog = QuestionCatalog::builtin();
        assert_eq!(catalog.len(), 8);
        for (index, question) in catalog.all().iter().enumerate() {
            assert_eq!(question.day().value() as usize, index + 1);
            assert!(question.is_multiple_choice());
        }
        assert_eq!(
            catalog.categories(),
            vec![
                Category::preflop(),
                Category::flop(),
                Category::turn(),
                Category::river(),
                Category::icm(),
            ]
        );
    }

    #[test]
    fn preflop_filter_keeps_order() {
        let catalog = mixed();
        let filter = CategoryFilter::parse("preflop").unwrap();
        assert_eq!(ids(&catalog.filter(&filter)), vec!["p1", "p2", "p3"]);
        assert_eq!(ids(&catalog.by_category(&Category::flop())), vec!["f1", "f2"]);
        assert_eq!(catalog.filter(&CategoryFilter::All).len(), 5);
    }

    #[test]
    fn by_day_finds_question() {
        let catalog = mixed();
        assert_eq!(catalog.by_day(Day::new(4)).unwrap().id().as_str(), "f2");
        assert!(catalog.by_day(Day::new(9)).is_none());
    }

    #[test]
    fn neighbor_wraps_within_filter() {
        let catalog = mixed();
        let preflop = CategoryFilter::Only(Category::preflop());

        let next = catalog.neighbor(Day::new(5), Direction::Next, &preflop).unwrap();
        assert_eq!(next.id().as_str(), "p1");

        let prev = catalog
            .neighbor(Day::new(1), Direction::Previous, &preflop)
            .unwrap();
        assert_eq!(prev.id().as_str(), "p3");

        let from_outside = catalog.neighbor(Day::new(2), Direction::Next, &preflop).unwrap();
        assert_eq!(from_outside.id().as_str(), "p1");
    }

    #[test]
    fn neighbor_on_empty_filter_is_none() {
        let catalog = mixed();
        let river = CategoryFilter::Only(Category::river());
        assert!(catalog.neighbor(Day::new(1), Direction::Next, &river).is_none());
    }
}
