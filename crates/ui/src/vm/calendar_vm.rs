use quiz_core::QuestionCatalog;
use quiz_core::model::{Day, DayStatus, ProgressMap};
use quiz_core::stats::completion_percentage;

pub const WEEK_LEN: usize = 7;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarCellVm {
    pub day: Day,
    pub category_label: String,
    pub completed: bool,
    pub correct: Option<bool>,
    pub current: bool,
}

impl CalendarCellVm {
    #[must_use]
    pub fn class(&self) -> String {
        let mut class = String::from("calendar-cell");
        if self.completed {
            class.push_str(" calendar-cell--done");
        }
        match self.correct {
            Some(true) => class.push_str(" calendar-cell--correct"),
            Some(false) => class.push_str(" calendar-cell--wrong"),
            None => {}
        }
        if self.current {
            class.push_str(" calendar-cell--current");
        }
        class
    }
}

/// Day grid for the whole catalog, one row per week.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarVm {
    pub rows: Vec<Vec<CalendarCellVm>>,
    pub completed: usize,
    pub total: usize,
}

impl CalendarVm {
    #[must_use]
    pub fn build(catalog: &QuestionCatalog, progress: &ProgressMap, current: Option<Day>) -> Self {
        let cells: Vec<CalendarCellVm> = catalog
            .all()
            .iter()
            .map(|question| {
                let status = progress.get(question.day());
                CalendarCellVm {
                    day: question.day(),
                    category_label: question.category().display_label().to_string(),
                    completed: status.is_some_and(DayStatus::is_completed),
                    correct: status.and_then(DayStatus::is_correct),
                    current: current == Some(question.day()),
                }
            })
            .collect();

        let completed = cells.iter().filter(|cell| cell.completed).count();
        let total = cells.len();
        let rows = cells.chunks(WEEK_LEN).map(<[_]>::to_vec).collect();

        Self {
            rows,
            completed,
            total,
        }
    }

    #[must_use]
    pub fn percentage(&self) -> u8 {
        completion_percentage(self.completed, self.total)
    }

    /// Inline width for the progress bar.
    #[must_use]
    pub fn bar_style(&self) -> String {
        format!("width: {}%", self.percentage())
    }
}
