use std::sync::Arc;

use quiz_core::model::Theme;
use quiz_core::{Clock, QuestionCatalog};
use storage::{LocalPersistence, Storage};

use crate::auth_service::AuthService;
use crate::error::AppServicesError;
use crate::gateway::{
    InMemoryGateway, QuestionAdmin, RemoteGateway, SupabaseConfig, SupabaseGateway,
};
use crate::generator::{GeneratorConfig, QuizGenerator};
use crate::progress::ProgressService;
use crate::question_service::QuestionService;

/// Which backend `AppServices` ended up talking to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Supabase,
    InMemory,
}

/// Assembles app-facing services over one gateway and one local store.
#[derive(Clone)]
pub struct AppServices {
    backend: BackendKind,
    admin: Arc<dyn QuestionAdmin>,
    local: LocalPersistence,
    progress: Arc<ProgressService>,
    auth: Arc<AuthService>,
    questions: Arc<QuestionService>,
    generator: Arc<QuizGenerator>,
}

impl AppServices {
    /// Build services from `QUIZ_*` environment configuration and `SQLite`
    /// local storage.
    ///
    /// Without Supabase settings an in-memory backend seeded with the
    /// built-in deck is used.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails or the
    /// environment holds invalid settings.
    pub async fn from_env(db_url: &str, scope: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let generator = QuizGenerator::new(GeneratorConfig::from_env()?);

        let services = match SupabaseConfig::from_env()? {
            Some(config) => {
                tracing::info!(url = %config.base_url, "using Supabase backend");
                let gateway = Arc::new(SupabaseGateway::new(config, clock));
                Self::assemble(
                    BackendKind::Supabase,
                    gateway.clone(),
                    gateway,
                    &storage,
                    scope,
                    generator,
                )
            }
            None => {
                tracing::info!("QUIZ_SUPABASE_URL not set; using in-memory backend");
                let gateway = Arc::new(InMemoryGateway::with_questions(
                    QuestionCatalog::builtin().all().to_vec(),
                ));
                Self::assemble(
                    BackendKind::InMemory,
                    gateway.clone(),
                    gateway,
                    &storage,
                    scope,
                    generator,
                )
            }
        };
        Ok(services)
    }

    /// Wire services over an explicit gateway and storage.
    #[must_use]
    pub fn with_gateway(
        gateway: InMemoryGateway,
        storage: &Storage,
        scope: &str,
        generator: QuizGenerator,
    ) -> Self {
        let gateway = Arc::new(gateway);
        Self::assemble(
            BackendKind::InMemory,
            gateway.clone(),
            gateway,
            storage,
            scope,
            generator,
        )
    }

    fn assemble(
        backend: BackendKind,
        gateway: Arc<dyn RemoteGateway>,
        admin: Arc<dyn QuestionAdmin>,
        storage: &Storage,
        scope: &str,
        generator: QuizGenerator,
    ) -> Self {
        let local = LocalPersistence::new(Arc::clone(&storage.kv), scope);
        let progress = Arc::new(ProgressService::new(Arc::clone(&gateway), local.clone()));
        let auth = Arc::new(AuthService::new(Arc::clone(&gateway), Arc::clone(&progress)));
        let questions = Arc::new(QuestionService::new(gateway));
        Self {
            backend,
            admin,
            local,
            progress,
            auth,
            questions,
            generator: Arc::new(generator),
        }
    }

    #[must_use]
    pub fn backend(&self) -> BackendKind {
        self.backend
    }

    #[must_use]
    pub fn admin(&self) -> Arc<dyn QuestionAdmin> {
        Arc::clone(&self.admin)
    }

    #[must_use]
    pub fn local(&self) -> &LocalPersistence {
        &self.local
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
    pub fn questions(&self) -> Arc<QuestionService> {
        Arc::clone(&self.questions)
    }

    #[must_use]
    pub fn generator(&self) -> Arc<QuizGenerator> {
        Arc::clone(&self.generator)
    }

    /// Stored theme, or the default when none is saved.
    pub async fn theme(&self) -> Theme {
        self.local.load_theme().await.unwrap_or_default()
    }
}
