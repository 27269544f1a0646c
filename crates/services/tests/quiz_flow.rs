use quiz_core::model::{Day, DayStatus, ProgressMap, Theme};
use services::{
    AppServices, Authority, InMemoryGateway, QuizGenerator, RemoteGateway, SignUpForm,
    SignUpOutcome,
};
use storage::repository::Storage;

async fn services(name: &str, gateway: InMemoryGateway) -> (AppServices, Storage) {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let storage = Storage::sqlite(&url).await.expect("connect sqlite");
    let services = AppServices::with_gateway(gateway, &storage, "default", QuizGenerator::new(None));
    (services, storage)
}

fn form() -> SignUpForm {
    SignUpForm {
        email: "alice@example.com".into(),
        password: "secret1".into(),
        confirm_password: "secret1".into(),
    }
}

#[tokio::test]
async fn anonymous_session_records_locally() {
    let (services, storage) = services("memdb_anonymous", InMemoryGateway::new()).await;

    assert_eq!(services.auth().restore().await.unwrap(), None);
    assert!(services.progress().snapshot().is_empty());

    let catalog = services.questions().load_catalog().await.unwrap();
    let day3 = catalog.by_day(Day::new(3)).expect("builtin day 3");
    let correct = day3.correct_option().expect("multiple choice");
    let status = day3.grade(Some(correct)).unwrap();
    services.progress().record(day3.day(), status).await.unwrap();

    assert_eq!(
        storage.kv.get("default:quizProgress").await.unwrap().as_deref(),
        Some(r#"{"3":"correct"}"#)
    );
}

#[tokio::test]
async fn sign_in_merges_local_into_remote() {
    let gateway = InMemoryGateway::new();
    let (services, _storage) = services("memdb_merge", gateway.clone()).await;

    services.auth().restore().await.unwrap();
    let progress = services.progress();
    progress.record(Day::new(1), DayStatus::Completed).await.unwrap();
    progress.record(Day::new(2), DayStatus::Completed).await.unwrap();

    let SignUpOutcome::SignedIn(session) = gateway
        .sign_up("alice@example.com", "secret1")
        .await
        .unwrap()
    else {
        panic!("expected a session");
    };
    let remote: ProgressMap = [
        (Day::new(2), DayStatus::NotCompleted),
        (Day::new(3), DayStatus::Completed),
    ]
    .into_iter()
    .collect();
    gateway.put_progress(&session.user.id, remote);
    services.auth().sign_out().await.unwrap();

    services
        .auth()
        .sign_in("alice@example.com", "secret1")
        .await
        .unwrap();

    let stored = gateway.stored_progress(&session.user.id).unwrap();
    assert_eq!(
        serde_json::to_string(&stored).unwrap(),
        r#"{"1":true,"2":false,"3":true}"#
    );
    assert_eq!(progress.snapshot(), stored);
    assert_eq!(progress.authority(), Authority::Remote(session.user.id));
}

#[tokio::test]
async fn theme_survives_restart_of_services() {
    let (services, storage) = services("memdb_theme", InMemoryGateway::new()).await;
    assert_eq!(services.theme().await, Theme::Dark);
    services.local().save_theme(Theme::Light).await;

    let again = AppServices::with_gateway(
        InMemoryGateway::new(),
        &storage,
        "default",
        QuizGenerator::new(None),
    );
    assert_eq!(again.theme().await, Theme::Light);
}

#[tokio::test]
async fn password_mismatch_is_rejected_before_sign_up() {
    let gateway = InMemoryGateway::new();
    let (services, _storage) = services("memdb_mismatch", gateway).await;
    let mut mismatched = form();
    mismatched.confirm_password = "secret2".into();
    assert!(services.auth().sign_up(&mismatched).await.is_err());
    assert!(services.auth().sign_up(&form()).await.is_ok());
}
