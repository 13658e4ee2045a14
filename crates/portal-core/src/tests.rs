use std::rc::Rc;
use std::time::Duration;

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use tokio::task::LocalSet;

use crate::domain::{sample_draft, ApiError, ProgressCounts, QuotaField, Session, TrackerError};
use crate::testing::{FakeApi, TokioTimer};
use crate::tracker::{CursorPosition, QuotaCursor, QuotaTracker};
use crate::TrackerConfig;

fn tracker(api: &Rc<FakeApi>) -> QuotaTracker<FakeApi, TokioTimer> {
    tracker_with(api, QuotaCursor::new())
}

fn tracker_with(api: &Rc<FakeApi>, cursor: QuotaCursor) -> QuotaTracker<FakeApi, TokioTimer> {
    QuotaTracker::new(
        Rc::clone(api),
        Rc::new(TokioTimer),
        Session::new("u1", "token"),
        TrackerConfig::default(),
        cursor,
    )
}

#[tokio::test]
async fn test_submit_advances_by_one_after_reconcile() {
    let api = Rc::new(FakeApi::new(3, 2));
    let tracker = tracker(&api);
    tracker.store().refresh().await.unwrap();

    let controller = tracker.controller();
    assert_eq!(controller.position(), CursorPosition::Next(5));

    let outcome = controller.submit(5, &sample_draft(5)).await.unwrap();
    assert!(outcome.reconciled);
    assert_eq!((outcome.snapshot.submitted(), outcome.snapshot.pending()), (3, 3));
    assert_eq!(outcome.next, CursorPosition::Next(6));
    assert_eq!(api.post_count(), 1);
    assert_eq!(api.posted()[0].form_number, 6);
}

#[tokio::test]
async fn test_double_click_posts_once() {
    let api = Rc::new(FakeApi::new(3, 2));
    let tracker = tracker(&api);
    tracker.store().refresh().await.unwrap();
    let controller = tracker.controller();
    let draft = sample_draft(5);

    let (first, second) = futures::join!(controller.submit(5, &draft), controller.submit(5, &draft));
    assert!(first.is_ok());
    assert_eq!(second.unwrap_err(), TrackerError::ConcurrentSubmission);
    assert_eq!(api.post_count(), 1);
    assert!(!controller.is_in_flight());
}

#[tokio::test]
async fn test_stale_refresh_is_discarded() {
    let api = Rc::new(FakeApi::new(3, 2));
    let tracker = tracker(&api);
    let store = tracker.store();
    store.refresh().await.unwrap();

    let (refreshed, provisional) = futures::join!(store.refresh(), async { store.apply_optimistic() });
    let provisional = provisional.unwrap();
    assert_eq!(refreshed.unwrap(), provisional);
    assert_eq!(store.current().filled(), 6);
    assert!(store.state().is_provisional());
}

#[tokio::test]
async fn test_create_then_confirm_moves_item_to_submitted() {
    let api = Rc::new(FakeApi::new(0, 0));
    let tracker = tracker(&api);
    tracker.store().refresh().await.unwrap();
    let controller = tracker.controller();

    let outcome = controller.submit(0, &sample_draft(0)).await.unwrap();
    assert_eq!((outcome.snapshot.submitted(), outcome.snapshot.pending()), (0, 1));

    let snapshot = controller.confirm(&outcome.id).await.unwrap();
    assert_eq!((snapshot.submitted(), snapshot.pending()), (1, 0));
    assert_eq!(controller.position(), CursorPosition::Next(1));
}

#[tokio::test]
async fn test_last_item_completes_the_quota() {
    let api = Rc::new(FakeApi::new(690, 9));
    let tracker = tracker(&api);
    tracker.store().refresh().await.unwrap();
    let controller = tracker.controller();

    let outcome = controller.submit(699, &sample_draft(699)).await.unwrap();
    assert_eq!(outcome.next, CursorPosition::Complete);
    assert!(outcome.snapshot.is_complete());
    assert!(tracker.cursor().template(outcome.next).is_none());
}

#[tokio::test]
async fn test_over_reported_counts_are_clamped() {
    let api = Rc::new(FakeApi::new(650, 90));
    let tracker = tracker(&api);
    let snapshot = tracker.store().refresh().await.unwrap();
    assert_eq!(snapshot.filled(), 700);
    assert_eq!(tracker.controller().position(), CursorPosition::Complete);
}

#[tokio::test]
async fn test_prefilled_dataset_feeds_the_form() {
    let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let items = (0..3).map(|i| sample_draft(i).validate_on(today).unwrap()).collect();
    let api = Rc::new(FakeApi::new(1, 1));
    let tracker = tracker_with(&api, QuotaCursor::with_dataset(items));
    tracker.store().refresh().await.unwrap();

    let position = tracker.controller().position();
    let draft = tracker.cursor().template(position).unwrap();
    assert_eq!(draft.get(QuotaField::FormNumber), "3");
    assert_eq!(draft.get(QuotaField::IfscCode), "SBIN0001234");
}

#[tokio::test(start_paused = true)]
async fn test_polling_picks_up_changes_made_elsewhere() {
    let api = Rc::new(FakeApi::new(0, 0));
    let tracker = tracker(&api);
    let local = LocalSet::new();
    local
        .run_until(async {
            tracker.store().refresh().await.unwrap();
            let (handle, task) = tracker.start_polling(|_| {});
            tokio::task::spawn_local(task);

            api.set_counts(ProgressCounts { submitted: 4, pending: 1 });
            tokio::time::sleep(Duration::from_secs(31)).await;
            assert_eq!(tracker.controller().position(), CursorPosition::Next(5));
            handle.cancel();
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_polling_skips_ticks_during_a_submission() {
    let api = Rc::new(FakeApi::new(0, 0));
    let config = TrackerConfig::default()
        .with_poll_interval(Duration::from_secs(8))
        .with_submit_timeout(Duration::from_secs(20));
    let tracker = QuotaTracker::new(
        Rc::clone(&api),
        Rc::new(TokioTimer),
        Session::new("u1", "token"),
        config,
        QuotaCursor::new(),
    );
    let local = LocalSet::new();
    local
        .run_until(async {
            tracker.store().refresh().await.unwrap();
            let (_handle, task) = tracker.start_polling(|_| {});
            tokio::task::spawn_local(task);

            api.hang_posts(true);
            let err = tracker.controller().submit(0, &sample_draft(0)).await.unwrap_err();
            assert!(err.is_retryable());
            assert_eq!(api.fetch_count(), 1);

            tokio::time::sleep(Duration::from_secs(5)).await;
            assert_eq!(api.fetch_count(), 2);
        })
        .await;
}

#[tokio::test]
async fn test_read_failure_surfaces_on_state() {
    let api = Rc::new(FakeApi::new(2, 2));
    let tracker = tracker(&api);
    api.fail_reads(Some(ApiError::Rejected { status: 502, message: "bad gateway".into() }));

    let err = tracker.store().refresh().await.unwrap_err();
    assert!(matches!(err, TrackerError::Network(_)));
    let state = tracker.store().state();
    assert!(!state.loaded);
    assert!(state.last_error.is_some());
}
