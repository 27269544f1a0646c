//! Progress arithmetic shared by the calendar and statistics views.

use crate::catalog::QuestionCatalog;
use crate::model::{Category, ProgressMap};

/// `round(100 * completed / total)`, or 0 when `total` is 0.
#[must_use]
pub fn completion_percentage(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = completed.min(total);
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    let percent = ((completed as f64 / total as f64) * 100.0).round() as u8;
    percent
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryStats {
    pub category: Category,
    pub total: usize,
    pub completed: usize,
    pub correct: usize,
}

impl CategoryStats {
    #[must_use]
    pub fn percentage(&self) -> u8 {
        completion_percentage(self.completed, self.total)
    }

    fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            let ratio = self.completed as f64 / self.total as f64;
            ratio
        }
    }
}

/// Totals for the whole catalog plus one row per category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressStats {
    pub total: usize,
    pub completed: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub categories: Vec<CategoryStats>,
}

impl ProgressStats {
    /// Only days present in `catalog` count; stray progress keys are ignored.
    /// Categories are sorted by completion ratio, highest first; ties keep
    /// catalog order.
    #[must_use]
    pub fn compute(catalog: &QuestionCatalog, progress: &ProgressMap) -> Self {
        let mut categories: Vec<CategoryStats> = catalog
            .categories()
            .into_iter()
            .map(|category| CategoryStats {
                category,
                total: 0,
                completed: 0,
                correct: 0,
            })
            .collect();

        let mut stats = Self {
            total: catalog.len(),
            completed: 0,
            correct: 0,
            incorrect: 0,
            categories: Vec::new(),
        };

        for question in catalog.all() {
            let row = categories
                .iter_mut()
                .find(|row| &row.category == question.category());
            let status = progress
                .get(question.day())
                .filter(|status| status.is_completed());

            if let Some(row) = row {
                row.total += 1;
                if let Some(status) = status {
                    row.completed += 1;
                    if status.is_correct() == Some(true) {
                        row.correct += 1;
                    }
                }
            }

            let Some(status) = status else { continue };
            stats.completed += 1;
            match status.is_correct() {
                Some(true) => stats.correct += 1,
                Some(false) => stats.incorrect += 1,
                None => {}
            }
        }

        categories.sort_by(|a, b| b.ratio().total_cmp(&a.ratio()));
        stats.categories = categories;
        stats
    }

    #[must_use]
    pub fn percentage(&self) -> u8 {
        completion_percentage(self.completed, self.total)
    }

    /// Share of graded answers that were correct.
    #[must_use]
    pub fn accuracy(&self) -> u8 {
        completion_percentage(self.correct, self.correct + self.incorrect)
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Day, DayStatus, QuestionDraft, QuestionId};

    fn catalog() -> QuestionCatalog {
        let make = |day: u32, category: Category| {
            QuestionDraft::new(
                QuestionId::new(format!("q{day}")),
                Day::new(day),
                "title",
                category,
                "prompt",
                "solution",
            )
            .validate()
            .unwrap()
        };
        QuestionCatalog::new(vec![
            make(1, Category::preflop()),
            make(2, Category::preflop()),
            make(3, Category::flop()),
            make(4, Category::river()),
        ])
    }

    #[test]
    fn percentage_edges() {
        assert_eq!(completion_percentage(0, 0), 0);
        assert_eq!(completion_percentage(0, 7), 0);
        assert_eq!(completion_percentage(7, 7), 100);
        assert_eq!(completion_percentage(1, 3), 33);
        assert_eq!(completion_percentage(2, 3), 67);
    }

    #[test]
    fn categories_sorted_by_completion_ratio() {
        let progress: ProgressMap = [
            (Day::new(1), DayStatus::Correct),
            (Day::new(3), DayStatus::Incorrect),
            (Day::new(9), DayStatus::Correct),
        ]
        .into_iter()
        .collect();

        let stats = ProgressStats::compute(&catalog(), &progress);

        assert_eq!(stats.total, 4);
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.percentage(), 50);
        assert_eq!(stats.accuracy(), 50);
        assert_eq!(stats.remaining(), 2);

        let order: Vec<&str> = stats.categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(order, vec!["flop", "preflop", "river"]);
        assert_eq!(stats.categories[1].percentage(), 50);
        assert_eq!(stats.categories[1].correct, 1);
    }

    #[test]
    fn legacy_false_is_not_completed() {
        let progress: ProgressMap = [(Day::new(1), DayStatus::NotCompleted)].into_iter().collect();
        let stats = ProgressStats::compute(&catalog(), &progress);
        assert_eq!(stats.completed, 0);
        assert_eq!(stats.accuracy(), 0);
    }
}
