use dioxus::prelude::*;
use quiz_core::QuestionCatalog;
use quiz_core::model::ProgressMap;

use crate::vm::StatsVm;

#[component]
pub fn StatsView(catalog: QuestionCatalog, progress: ProgressMap) -> Element {
    let vm = StatsVm::build(&catalog, &progress);
    let has_graded = vm.has_graded();

    rsx! {
        section { class: "stats",
            h2 { "Your progress" }
            div { class: "stats-cards",
                div { class: "stat-card",
                    span { class: "stat-value", "{vm.percentage}%" }
                    span { class: "stat-label", "Completed" }
                }
                div { class: "stat-card",
                    span { class: "stat-value", "{vm.completed} / {vm.total}" }
                    span { class: "stat-label", "Questions answered" }
                }
                div { class: "stat-card",
                    span { class: "stat-value", "{vm.remaining}" }
                    span { class: "stat-label", "Remaining" }
                }
                div { class: "stat-card",
                    if has_graded {
                        span { class: "stat-value", "{vm.accuracy}%" }
                    } else {
                        span { class: "stat-value", "-" }
                    }
                    span { class: "stat-label", "Accuracy ({vm.correct} of {vm.graded} correct)" }
                }
            }
            h3 { "By category" }
            ul { class: "category-stats",
                for row in vm.categories.iter() {
                    li { key: "{row.label}", class: "category-stat",
                        div { class: "category-stat-header",
                            span { class: "category-stat-label", "{row.label}" }
                            span { class: "category-stat-count", "{row.completed}/{row.total} ({row.percentage}%)" }
                        }
                        div { class: "progress-bar",
                            div { class: "progress-bar-fill", style: row.bar_style() }
                        }
                    }
                }
            }
        }
    }
}
