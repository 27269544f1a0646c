use dioxus::prelude::*;
use quiz_core::model::{Day, DayStatus, ProgressMap, Theme, User};

use crate::context::AppContext;
use crate::views::{
    AuthView, CalendarView, ErrorNotice, Navbar, QuizView, StatsView, ViewError, ViewState,
    view_error, view_state_from_resource,
};
use crate::vm::{NavVm, Tab};

/// Theme and session state. Owned by the root component; children receive
/// copies as props and report changes through callbacks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppState {
    pub theme: Theme,
    pub user: Option<User>,
    pub tab: Tab,
    pub current_day: Option<Day>,
    pub auth_open: bool,
}

impl AppState {
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn root_class(&self) -> String {
        format!("app theme-{}", self.theme.as_str())
    }

    #[must_use]
    pub fn nav(&self) -> NavVm {
        NavVm::new(self.tab, self.user.as_ref(), self.theme)
    }

    #[must_use]
    pub fn show_auth(&self) -> bool {
        self.auth_open && self.user.is_none()
    }

    pub fn open_day(&mut self, day: Day) {
        self.current_day = Some(day);
        self.tab = Tab::Quiz;
    }

    pub fn signed_in(&mut self, user: User) {
        self.user = Some(user);
        self.auth_open = false;
    }
}

#[component]
pub fn App() -> Element {
    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }

        document::Title { "Poker Quiz" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                QuizShell {}
            }
        }
    }
}

#[component]
pub fn QuizShell() -> Element {
    let ctx = use_context::<AppContext>();
    let mut state = use_signal(|| AppState::new(ctx.initial_theme()));
    let mut progress = use_signal(ProgressMap::new);
    let mut unsaved = use_signal(|| None::<(Day, DayStatus)>);

    // Session first, so progress comes from the store that owns it.
    let mut bootstrap = {
        let auth = ctx.auth();
        let questions = ctx.questions();
        let progress_service = ctx.progress();
        use_resource(move || {
            let auth = auth.clone();
            let questions = questions.clone();
            let progress_service = progress_service.clone();
            let mut state = state;
            let mut progress = progress;
            async move {
                let user = auth.restore().await.map_err(view_error("restore session"))?;
                let catalog = questions
                    .load_catalog()
                    .await
                    .map_err(view_error("load questions"))?;
                state.write().user = user;
                progress.set(progress_service.snapshot());
                Ok::<_, ViewError>(catalog)
            }
        })
    };

    let record = {
        let progress_service = ctx.progress();
        use_callback(move |(day, status): (Day, DayStatus)| {
            let progress_service = progress_service.clone();
            spawn(async move {
                let mut progress = progress;
                let mut unsaved = unsaved;
                let result = progress_service.record(day, status).await;
                progress.set(progress_service.snapshot());
                match result {
                    Ok(_) => unsaved.set(None),
                    Err(err) => {
                        tracing::warn!(%day, error = %err, "progress not saved");
                        unsaved.set(Some((day, status)));
                    }
                }
            });
        })
    };

    let retry_save = use_callback(move |()| {
        if let Some(pending) = unsaved() {
            record.call(pending);
        }
    });

    let toggle_theme = {
        let local = ctx.local();
        use_callback(move |()| {
            let theme = state.read().theme.toggled();
            state.write().theme = theme;
            let local = local.clone();
            spawn(async move {
                local.save_theme(theme).await;
            });
        })
    };

    let signed_in = {
        let progress_service = ctx.progress();
        use_callback(move |user: User| {
            tracing::info!(user = %user.id, "signed in");
            state.write().signed_in(user);
            progress.set(progress_service.snapshot());
        })
    };

    let sign_out = {
        let auth = ctx.auth();
        let progress_service = ctx.progress();
        use_callback(move |()| {
            let auth = auth.clone();
            let progress_service = progress_service.clone();
            spawn(async move {
                let mut state = state;
                let mut progress = progress;
                if let Err(err) = auth.sign_out().await {
                    tracing::warn!(error = %err, "remote sign-out failed");
                }
                state.write().user = None;
                progress.set(progress_service.snapshot());
            });
        })
    };

    let snapshot = state.read().clone();
    let progress_map = progress.read().clone();

    let body = if snapshot.show_auth() {
        rsx! {
            AuthView {
                on_signed_in: signed_in,
                on_cancel: move |()| state.write().auth_open = false,
            }
        }
    } else {
        match view_state_from_resource(bootstrap) {
            ViewState::Idle | ViewState::Loading => rsx! {
                p { class: "loading", "Loading..." }
            },
            ViewState::Error(_) => rsx! {
                ErrorNotice { on_retry: move |()| bootstrap.restart() }
            },
            ViewState::Ready(catalog) => match snapshot.tab {
                Tab::Quiz => rsx! {
                    QuizView {
                        catalog,
                        progress: progress_map,
                        current: snapshot.current_day,
                        on_open: move |day| state.write().open_day(day),
                        on_answer: record,
                    }
                },
                Tab::Calendar => rsx! {
                    CalendarView {
                        catalog,
                        progress: progress_map,
                        current: snapshot.current_day,
                        on_open: move |day| state.write().open_day(day),
                    }
                },
                Tab::Stats => rsx! {
                    StatsView { catalog, progress: progress_map }
                },
            },
        }
    };

    rsx! {
        div { class: snapshot.root_class(),
            Navbar {
                vm: snapshot.nav(),
                on_select: move |tab| state.write().tab = tab,
                on_toggle_theme: toggle_theme,
                on_sign_in: move |()| state.write().auth_open = true,
                on_sign_out: sign_out,
            }
            main { class: "content",
                if unsaved.read().is_some() {
                    ErrorNotice { on_retry: retry_save }
                }
                {body}
            }
        }
    }
}
