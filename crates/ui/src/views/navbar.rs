use dioxus::prelude::*;

use crate::vm::{NavVm, Tab, UserBadgeVm};

#[component]
pub fn Navbar(
    vm: NavVm,
    on_select: Callback<Tab>,
    on_toggle_theme: Callback<()>,
    on_sign_in: Callback<()>,
    on_sign_out: Callback<()>,
) -> Element {
    let theme_label = vm.theme_toggle_label;

    rsx! {
        nav { class: "navbar",
            h1 { class: "navbar-brand", "Poker Quiz" }
            ul { class: "nav-tabs",
                for tab in Tab::ALL {
                    li { key: "{tab.label()}",
                        button {
                            class: vm.tab_class(tab),
                            r#type: "button",
                            onclick: move |_| on_select.call(tab),
                            "{tab.label()}"
                        }
                    }
                }
            }
            div { class: "navbar-actions",
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| on_toggle_theme.call(()),
                    "{theme_label}"
                }
                match vm.badge.clone() {
                    Some(badge) => rsx! {
                        UserBadge { badge, on_sign_out }
                    },
                    None => rsx! {
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            onclick: move |_| on_sign_in.call(()),
                            "Sign in"
                        }
                    },
                }
            }
        }
    }
}

#[component]
pub fn UserBadge(badge: UserBadgeVm, on_sign_out: Callback<()>) -> Element {
    rsx! {
        div { class: "user-badge",
            span { class: "user-badge-initial", "{badge.initial}" }
            span { class: "user-badge-name", "{badge.name}" }
            button {
                class: "btn btn-link",
                r#type: "button",
                onclick: move |_| on_sign_out.call(()),
                "Sign out"
            }
        }
    }
}
