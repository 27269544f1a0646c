use std::sync::Arc;

use quiz_core::model::Theme;
use services::{AppServices, AuthService, ProgressService, QuestionService};
use storage::LocalPersistence;

pub trait UiApp: Send + Sync {
    fn initial_theme(&self) -> Theme;

    fn questions(&self) -> Arc<QuestionService>;
    fn progress(&self) -> Arc<ProgressService>;
    fn auth(&self) -> Arc<AuthService>;
    fn local(&self) -> LocalPersistence;
}

/// `AppServices` plus the theme read before launch.
pub struct ServicesApp {
    services: AppServices,
    theme: Theme,
}

impl ServicesApp {
    #[must_use]
    pub fn new(services: AppServices, theme: Theme) -> Self {
        Self { services, theme }
    }
}

impl UiApp for ServicesApp {
    fn initial_theme(&self) -> Theme {
        self.theme
    }

    fn questions(&self) -> Arc<QuestionService> {
        self.services.questions()
    }

    fn progress(&self) -> Arc<ProgressService> {
        self.services.progress()
    }

    fn auth(&self) -> Arc<AuthService> {
        self.services.auth()
    }

    fn local(&self) -> LocalPersistence {
        self.services.local().clone()
    }
}

/// Service handles shared with every view. Mutable UI state lives in
/// `AppState`, not here.
#[derive(Clone)]
pub struct AppContext {
    initial_theme: Theme,

    questions: Arc<QuestionService>,
    progress: Arc<ProgressService>,
    auth: Arc<AuthService>,
    local: LocalPersistence,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            initial_theme: app.initial_theme(),
            questions: app.questions(),
            progress: app.progress(),
            auth: app.auth(),
            local: app.local(),
        }
    }

    #[must_use]
    pub fn initial_theme(&self) -> Theme {
        self.initial_theme
    }

    #[must_use]
    pub fn questions(&self) -> Arc<QuestionService> {
        Arc::clone(&self.questions)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn local(&self) -> LocalPersistence {
        self.local.clone()
    }
}

// Provided by the composition root (`crates/app`) through the launch context.

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
