use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use quiz_core::QuestionCatalog;
use quiz_core::model::{Day, DayStatus, Theme};
use services::{AppServices, InMemoryGateway, QuizGenerator};
use storage::Storage;

use crate::app::QuizShell;
use crate::context::{ServicesApp, UiApp, build_app_context};
use crate::views::{AuthView, CalendarView, QuizView, StatsView};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Shell,
    Quiz(Option<u32>),
    Calendar(Option<u32>),
    Stats,
    Auth,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<ServicesApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewHarnessRoot(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    let ctx = use_context_provider(|| build_app_context(&app));
    let catalog = QuestionCatalog::builtin();
    let progress = ctx.progress().snapshot();

    match props.view {
        ViewKind::Shell => rsx! { QuizShell {} },
        ViewKind::Quiz(current) => rsx! {
            QuizView {
                catalog,
                progress,
                current: current.map(Day::new),
                on_open: |_| {},
                on_answer: |_| {},
            }
        },
        ViewKind::Calendar(current) => rsx! {
            CalendarView {
                catalog,
                progress,
                current: current.map(Day::new),
                on_open: |_| {},
            }
        },
        ViewKind::Stats => rsx! { StatsView { catalog, progress } },
        ViewKind::Auth => rsx! {
            AuthView { on_signed_in: |_| {}, on_cancel: |_| {} }
        },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub services: AppServices,
    pub gateway: InMemoryGateway,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Anonymous session over the built-in deck with `answers` already recorded
/// locally.
pub async fn setup_view_harness(view: ViewKind, answers: &[(u32, DayStatus)]) -> ViewHarness {
    let gateway = InMemoryGateway::with_questions(QuestionCatalog::builtin().all().to_vec());
    let storage = Storage::in_memory();
    let services =
        AppServices::with_gateway(gateway.clone(), &storage, "test", QuizGenerator::new(None));

    let progress = services.progress();
    progress.load_for(None).await.expect("load local progress");
    for (day, status) in answers {
        progress
            .record(Day::new(*day), *status)
            .await
            .expect("record progress");
    }

    let app = Arc::new(ServicesApp::new(services.clone(), Theme::Dark));
    let dom = VirtualDom::new_with_props(ViewHarnessRoot, ViewHarnessProps { app, view });

    ViewHarness {
        dom,
        services,
        gateway,
    }
}
