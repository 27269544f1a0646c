use quiz_core::model::{Day, DayStatus};

use super::test_harness::{ViewKind, setup_view_harness};

#[tokio::test(flavor = "current_thread")]
async fn shell_smoke_renders_first_question_after_loading() {
    let mut harness = setup_view_harness(ViewKind::Shell, &[]).await;
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    for expected in ["Facing an UTG open", "Reveal answer", "Sign in", "theme-dark"] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_opens_requested_day() {
    let mut harness =
        setup_view_harness(ViewKind::Quiz(Some(2)), &[(2, DayStatus::Incorrect)]).await;
    harness.rebuild();

    let html = harness.render();
    assert!(html.contains("Day 2"), "missing Day 2 in {html}");
    assert!(html.contains("Last time: incorrect"), "missing previous status in {html}");
    assert!(html.contains("1 / 8 completed"), "missing count in {html}");
    assert!(!html.contains("Solution"), "solution leaked before reveal: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn calendar_view_smoke_marks_completed_days() {
    let mut harness = setup_view_harness(
        ViewKind::Calendar(Some(3)),
        &[(1, DayStatus::Correct), (2, DayStatus::Completed)],
    )
    .await;
    harness.rebuild();

    let html = harness.render();
    assert!(html.contains("2 of 8 days completed"), "missing summary in {html}");
    assert!(html.contains("width: 25%"), "missing bar width in {html}");
    assert!(html.contains("calendar-cell--current"), "missing current day in {html}");
    assert!(html.contains("calendar-cell--correct"), "missing correct mark in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn stats_view_smoke_renders_totals() {
    let mut harness = setup_view_harness(
        ViewKind::Stats,
        &[(1, DayStatus::Correct), (4, DayStatus::Incorrect)],
    )
    .await;
    harness.rebuild();

    let html = harness.render();
    assert!(html.contains("2 / 8"), "missing totals in {html}");
    assert!(html.contains("25%"), "missing percentage in {html}");
    assert!(html.contains("Accuracy (1 of 2 correct)"), "missing accuracy in {html}");
    assert!(html.contains("Preflop"), "missing category row in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn auth_view_smoke_starts_in_login_mode() {
    let mut harness = setup_view_harness(ViewKind::Auth, &[]).await;
    harness.rebuild();

    let html = harness.render();
    assert!(html.contains("Sign in"), "missing title in {html}");
    assert!(html.contains("Register"), "missing mode switch in {html}");
    assert!(!html.contains("Confirm password"), "register field shown in login mode: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn shell_smoke_loads_saved_progress() {
    let mut harness = setup_view_harness(ViewKind::Shell, &[(1, DayStatus::Correct)]).await;
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Last time: correct"), "missing stored status in {html}");
    assert_eq!(
        harness.services.progress().snapshot().get(Day::new(1)),
        Some(DayStatus::Correct)
    );
    assert_eq!(harness.gateway.progress_writes(), 0);
}
