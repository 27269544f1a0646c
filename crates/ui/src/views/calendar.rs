use dioxus::prelude::*;
use quiz_core::QuestionCatalog;
use quiz_core::model::{Day, ProgressMap};

use crate::vm::CalendarVm;

#[component]
pub fn CalendarView(
    catalog: QuestionCatalog,
    progress: ProgressMap,
    current: Option<Day>,
    on_open: Callback<Day>,
) -> Element {
    let vm = CalendarVm::build(&catalog, &progress, current);
    let percentage = vm.percentage();
    let bar_style = vm.bar_style();
    let CalendarVm {
        rows,
        completed,
        total,
    } = vm;

    rsx! {
        section { class: "calendar",
            header { class: "calendar-header",
                h2 { "Training calendar" }
                p { class: "calendar-summary", "{completed} of {total} days completed" }
                div { class: "progress-bar",
                    div { class: "progress-bar-fill", style: "{bar_style}" }
                }
                span { class: "progress-label", "{percentage}%" }
            }
            div { class: "calendar-grid",
                for (week, row) in rows.into_iter().enumerate() {
                    div { key: "{week}", class: "calendar-row",
                        for cell in row {
                            button {
                                key: "{cell.day}",
                                class: cell.class(),
                                r#type: "button",
                                title: "{cell.category_label}",
                                onclick: move |_| on_open.call(cell.day),
                                span { class: "calendar-day", "{cell.day}" }
                                span { class: "calendar-category", "{cell.category_label}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
