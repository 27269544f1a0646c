use dioxus::prelude::*;
use quiz_core::model::{CategoryFilter, Day, DayStatus, ProgressMap, Question};
use quiz_core::{Direction, QuestionCatalog};

use crate::vm::{QuizCardVm, QuizPhase};

#[component]
pub fn QuizView(
    catalog: QuestionCatalog,
    progress: ProgressMap,
    current: Option<Day>,
    on_open: Callback<Day>,
    on_answer: Callback<(Day, DayStatus)>,
) -> Element {
    let mut filter = use_signal(CategoryFilter::default);
    let active = filter.read().clone();

    let visible = catalog.filter(&active);
    let completed = visible
        .iter()
        .filter(|q| progress.is_completed(q.day()))
        .count();
    let visible_total = visible.len();
    let shown = current
        .and_then(|day| visible.iter().find(|q| q.day() == day).copied())
        .or_else(|| visible.first().copied())
        .map(|q| {
            let day = q.day();
            let previous = catalog.neighbor(day, Direction::Previous, &active).map(Question::day);
            let next = catalog.neighbor(day, Direction::Next, &active).map(Question::day);
            (q.clone(), day, progress.get(day), previous, next)
        });

    let tabs: Vec<(String, CategoryFilter, bool)> = std::iter::once(CategoryFilter::All)
        .chain(catalog.categories().into_iter().map(CategoryFilter::Only))
        .map(|tab| {
            let label = match &tab {
                CategoryFilter::All => "All".to_string(),
                CategoryFilter::Only(category) => category.display_label().to_string(),
            };
            let is_active = tab == active;
            (label, tab, is_active)
        })
        .collect();

    rsx! {
        section { class: "quiz",
            div { class: "category-tabs",
                for (index, (label, tab, is_active)) in tabs.into_iter().enumerate() {
                    FilterTab {
                        key: "{index}",
                        label,
                        filter: tab,
                        active: is_active,
                        on_select: move |next| filter.set(next),
                    }
                }
            }
            p { class: "quiz-count", "{completed} / {visible_total} completed" }

            match shown {
                Some((question, day, previous_status, previous, next)) => rsx! {
                    QuizCard {
                        key: "{day}",
                        question,
                        previous: previous_status,
                        on_reveal: on_answer,
                    }
                    div { class: "quiz-nav",
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            disabled: previous.is_none(),
                            onclick: move |_| {
                                if let Some(day) = previous {
                                    on_open.call(day);
                                }
                            },
                            "Previous"
                        }
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            disabled: next.is_none(),
                            onclick: move |_| {
                                if let Some(day) = next {
                                    on_open.call(day);
                                }
                            },
                            "Next"
                        }
                    }
                },
                None => rsx! {
                    p { class: "empty", "No questions in this category yet." }
                },
            }
        }
    }
}

#[component]
fn FilterTab(
    label: String,
    filter: CategoryFilter,
    active: bool,
    on_select: Callback<CategoryFilter>,
) -> Element {
    let class = if active {
        "category-tab category-tab--active"
    } else {
        "category-tab"
    };
    rsx! {
        button {
            class,
            r#type: "button",
            onclick: move |_| on_select.call(filter.clone()),
            "{label}"
        }
    }
}

/// One question. Remounted per day, so each visit starts unanswered.
#[component]
fn QuizCard(
    question: Question,
    previous: Option<DayStatus>,
    on_reveal: Callback<(Day, DayStatus)>,
) -> Element {
    let mut vm = use_signal(|| QuizCardVm::new(question.clone(), previous));
    let card = vm.read().clone();

    let day = card.day();
    let options = card.options();
    let revealed = card.phase() == QuizPhase::AnswerRevealed;
    let can_reveal = card.can_reveal();
    let description = card.question().description().map(str::to_string);
    let verdict = card.verdict();
    let solution = card.solution_text().map(str::to_string);

    rsx! {
        article { class: "quiz-card",
            header { class: "quiz-card-header",
                span { class: "quiz-day", "Day {day}" }
                span { class: "quiz-category", "{card.category_label()}" }
                if let Some(difficulty) = card.difficulty_label() {
                    span { class: "quiz-difficulty", "{difficulty}" }
                }
                if let Some(status) = card.previous_status() {
                    span { class: "quiz-previous", "Last time: {status}" }
                }
            }
            h2 { class: "quiz-title", "{card.title()}" }
            p { class: "quiz-prompt", "{card.prompt_text()}" }
            if let Some(description) = description {
                p { class: "quiz-description", "{description}" }
            }

            if !options.is_empty() {
                ul { class: "quiz-options",
                    for option in options {
                        li { key: "{option.index}",
                            button {
                                class: option.style.class(),
                                r#type: "button",
                                disabled: revealed,
                                onclick: move |_| {
                                    vm.write().select(option.index);
                                },
                                span { class: "option-letter", "{option.letter}" }
                                span { class: "option-label", "{option.label}" }
                            }
                        }
                    }
                }
            }

            match solution {
                Some(text) => rsx! {
                    div { class: "quiz-solution",
                        match verdict {
                            Some(true) => rsx! { p { class: "verdict verdict--correct", "Correct!" } },
                            Some(false) => rsx! { p { class: "verdict verdict--wrong", "Not quite." } },
                            None => rsx! {},
                        }
                        h3 { "Solution" }
                        p { "{text}" }
                    }
                },
                None => rsx! {
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        disabled: !can_reveal,
                        onclick: move |_| {
                            let status = vm.write().reveal();
                            if let Some(status) = status {
                                on_reveal.call((day, status));
                            }
                        },
                        "Reveal answer"
                    }
                },
            }
        }
    }
}
