use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::QuestionCatalog;
use quiz_core::model::Category;
use services::{AppServices, BackendKind, Clock, GenerationRequest};
use tracing_subscriber::EnvFilter;
use ui::{App, ServicesApp, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidScope { raw: String },
    InvalidCategory { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidScope { raw } => write!(f, "invalid --scope value: {raw:?}"),
            ArgsError::InvalidCategory { raw } => write!(f, "invalid --category value: {raw:?}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct Args {
    db_url: String,
    scope: String,
    category: Category,
    topic: Option<String>,
    verbose: bool,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui       [--db <sqlite_url>] [--scope <name>] [--verbose]");
    eprintln!("  cargo run -p app -- seed     [--db <sqlite_url>] [--verbose]");
    eprintln!(
        "  cargo run -p app -- generate [--db <sqlite_url>] [--category <label>] [--topic <text>]"
    );
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite://quiz.sqlite3");
    eprintln!("  --scope default");
    eprintln!("  --category preflop");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_DB_URL, QUIZ_SCOPE, QUIZ_SUPABASE_URL, QUIZ_SUPABASE_ANON_KEY,");
    eprintln!("  QUIZ_AI_API_KEY, QUIZ_AI_BASE_URL, QUIZ_AI_MODEL, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Seed,
    Generate,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "seed" => Some(Self::Seed),
            "generate" => Some(Self::Generate),
            _ => None,
        }
    }
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("QUIZ_DB_URL")
            .ok()
            .map_or_else(|| "sqlite://quiz.sqlite3".into(), normalize_sqlite_url);
        let mut scope = std::env::var("QUIZ_SCOPE")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| "default".into());
        let mut category = Category::preflop();
        let mut topic = None;
        let mut verbose = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--scope" => {
                    let value = require_value(args, "--scope")?;
                    if value.trim().is_empty() || value.contains(':') {
                        return Err(ArgsError::InvalidScope { raw: value });
                    }
                    scope = value.trim().to_string();
                }
                "--category" => {
                    let value = require_value(args, "--category")?;
                    category = Category::new(&value)
                        .map_err(|_| ArgsError::InvalidCategory { raw: value.clone() })?;
                }
                "--topic" => {
                    topic = Some(require_value(args, "--topic")?);
                }
                "--verbose" | "-v" => verbose = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            scope,
            category,
            topic,
            verbose,
        })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand launches the UI.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with('-') => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with('-') {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing(parsed.verbose);
    tracing::debug!(?cmd, db = %parsed.db_url, scope = %parsed.scope, "starting");

    // Local storage is opened and migrated here so core/services stay free of paths.
    prepare_sqlite_file(&parsed.db_url)?;
    let services = AppServices::from_env(&parsed.db_url, &parsed.scope, Clock::default()).await?;

    match cmd {
        Command::Ui => {
            launch_ui(services).await;
            Ok(())
        }
        Command::Seed => seed(&services).await,
        Command::Generate => generate(&services, parsed.category, parsed.topic).await,
    }
}

async fn launch_ui(services: AppServices) {
    let theme = services.theme().await;
    let app: Arc<dyn UiApp> = Arc::new(ServicesApp::new(services, theme));
    let context = build_app_context(&app);

    // Some dev setups default the desktop window to always-on-top.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Poker Quiz")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
}

fn warn_if_ephemeral(services: &AppServices) {
    if services.backend() == BackendKind::InMemory {
        tracing::warn!("QUIZ_SUPABASE_URL is not set; changes only live for this process");
    }
}

async fn seed(services: &AppServices) -> Result<(), Box<dyn std::error::Error>> {
    warn_if_ephemeral(services);
    let catalog = QuestionCatalog::builtin();
    let inserted = services.admin().seed_questions(catalog.all()).await?;
    if inserted == 0 {
        println!("seed: question table already populated; nothing inserted");
    } else {
        println!("seed: inserted {inserted} questions");
    }
    Ok(())
}

async fn generate(
    services: &AppServices,
    category: Category,
    topic: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    warn_if_ephemeral(services);
    let mut request = GenerationRequest::new(category);
    request.topic = topic;

    let generated = services.generator().generate(&request).await?;
    let day = services.questions().next_remote_day().await?;

    let title = generated.title.clone();
    let question = generated.into_question(day)?;
    let id = services.admin().add_question(&question).await?;
    println!("generate: added \"{title}\" as day {day} ({id})");
    Ok(())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // Binary glue: report once and exit.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
