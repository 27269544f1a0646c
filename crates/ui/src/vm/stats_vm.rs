use quiz_core::QuestionCatalog;
use quiz_core::model::ProgressMap;
use quiz_core::stats::{CategoryStats, ProgressStats};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryRowVm {
    pub label: String,
    pub completed: usize,
    pub total: usize,
    pub percentage: u8,
}

impl From<&CategoryStats> for CategoryRowVm {
    fn from(stats: &CategoryStats) -> Self {
        Self {
            label: stats.category.display_label().to_string(),
            completed: stats.completed,
            total: stats.total,
            percentage: stats.percentage(),
        }
    }
}

impl CategoryRowVm {
    #[must_use]
    pub fn bar_style(&self) -> String {
        format!("width: {}%", self.percentage)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatsVm {
    pub completed: usize,
    pub total: usize,
    pub remaining: usize,
    pub percentage: u8,
    pub correct: usize,
    pub graded: usize,
    pub accuracy: u8,
    /// Highest completion ratio first.
    pub categories: Vec<CategoryRowVm>,
}

impl From<&ProgressStats> for StatsVm {
    fn from(stats: &ProgressStats) -> Self {
        Self {
            completed: stats.completed,
            total: stats.total,
            remaining: stats.remaining(),
            percentage: stats.percentage(),
            correct: stats.correct,
            graded: stats.correct + stats.incorrect,
            accuracy: stats.accuracy(),
            categories: stats.categories.iter().map(CategoryRowVm::from).collect(),
        }
    }
}

impl StatsVm {
    #[must_use]
    pub fn build(catalog: &QuestionCatalog, progress: &ProgressMap) -> Self {
        Self::from(&ProgressStats::compute(catalog, progress))
    }

    #[must_use]
    pub fn has_graded(&self) -> bool {
        self.graded > 0
    }
}
