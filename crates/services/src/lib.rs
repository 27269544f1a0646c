#![forbid(unsafe_code)]

pub mod app_services;
pub mod auth_service;
pub mod error;
pub mod gateway;
pub mod generator;
pub mod progress;
pub mod question_service;

pub use quiz_core::Clock;

pub use app_services::{AppServices, BackendKind};
pub use auth_service::{AuthService, SignUpForm};
pub use error::{
    AppServicesError, AuthError, ConfigError, GatewayError, GeneratorError, ProgressError,
};
pub use gateway::{
    InMemoryGateway, QuestionAdmin, RemoteGateway, SignUpOutcome, SupabaseConfig, SupabaseGateway,
};
pub use generator::{GeneratedQuestion, GenerationRequest, GeneratorConfig, QuizGenerator};
pub use progress::{Authority, ProgressService};
pub use question_service::QuestionService;
