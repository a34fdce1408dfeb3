//! Integration tests for the AV decoder status tracker
//!
//! Covers the poll/debounce/fan-out cycle end to end: notifications fire
//! exactly once per transition, readers see only committed values, stop is
//! prompt and final, and registry churn does not disturb other listeners.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use devdiag_common::DecoderLevel;
use devdiag_svc::avstatus::{NotificationSink, StatusSource, StatusTracker};
use devdiag_svc::Error;

/// Poll interval used throughout; long enough to be stable on a loaded
/// machine, short enough to keep the tests fast.
const POLL: Duration = Duration::from_millis(10);

/// Generous settle time covering several poll cycles
async fn settle() {
    tokio::time::sleep(POLL * 12).await;
}

/// Status source whose level the test sets directly
struct SettableSource {
    level: Mutex<DecoderLevel>,
}

impl SettableSource {
    fn new(initial: DecoderLevel) -> Arc<Self> {
        Arc::new(Self {
            level: Mutex::new(initial),
        })
    }

    fn set(&self, level: DecoderLevel) {
        *self.level.lock().unwrap() = level;
    }
}

impl StatusSource for SettableSource {
    fn query(&self) -> DecoderLevel {
        *self.level.lock().unwrap()
    }
}

/// Sink that records every notification it receives
struct RecordingSink {
    seen: Mutex<Vec<DecoderLevel>>,
}

impl RecordingSink {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            seen: Mutex::new(Vec::new()),
        })
    }

    fn seen(&self) -> Vec<DecoderLevel> {
        self.seen.lock().unwrap().clone()
    }
}

impl NotificationSink for RecordingSink {
    fn on_decoder_status_changed(&self, status: DecoderLevel) {
        self.seen.lock().unwrap().push(status);
    }
}

#[tokio::test]
async fn current_status_defaults_to_idle_before_first_poll() {
    let tracker = StatusTracker::new(SettableSource::new(DecoderLevel::Active), POLL);

    // Not started: the initial default must be visible
    assert_eq!(tracker.current_status(), DecoderLevel::Idle);
}

#[tokio::test]
async fn notifies_once_per_transition_and_debounces_repeats() {
    let source = SettableSource::new(DecoderLevel::Idle);
    let tracker = Arc::new(StatusTracker::new(source.clone(), POLL));
    let sink = RecordingSink::new();
    tracker.register_listener(sink.clone()).unwrap();

    tracker.start();

    // Idle sampled repeatedly: no notifications, status stays Idle
    settle().await;
    assert_eq!(sink.seen(), Vec::<DecoderLevel>::new());
    assert_eq!(tracker.current_status(), DecoderLevel::Idle);

    // Idle -> Active: exactly one notification
    source.set(DecoderLevel::Active);
    settle().await;
    assert_eq!(sink.seen(), vec![DecoderLevel::Active]);
    assert_eq!(tracker.current_status(), DecoderLevel::Active);

    // Active again: no further notifications
    settle().await;
    assert_eq!(sink.seen(), vec![DecoderLevel::Active]);

    // Active -> Paused: exactly one more notification
    source.set(DecoderLevel::Paused);
    settle().await;
    assert_eq!(
        sink.seen(),
        vec![DecoderLevel::Active, DecoderLevel::Paused]
    );
    assert_eq!(tracker.current_status(), DecoderLevel::Paused);

    tracker.stop().await;
}

#[tokio::test]
async fn delivers_transitions_in_order_to_all_listeners() {
    let source = SettableSource::new(DecoderLevel::Idle);
    let tracker = Arc::new(StatusTracker::new(source.clone(), POLL));
    let first = RecordingSink::new();
    let second = RecordingSink::new();
    tracker.register_listener(first.clone()).unwrap();
    tracker.register_listener(second.clone()).unwrap();

    tracker.start();

    for level in [
        DecoderLevel::Active,
        DecoderLevel::Paused,
        DecoderLevel::Idle,
    ] {
        source.set(level);
        settle().await;
    }

    let expected = vec![
        DecoderLevel::Active,
        DecoderLevel::Paused,
        DecoderLevel::Idle,
    ];
    assert_eq!(first.seen(), expected);
    assert_eq!(second.seen(), expected);

    tracker.stop().await;
}

#[tokio::test]
async fn duplicate_registration_fails_and_does_not_double_deliver() {
    let source = SettableSource::new(DecoderLevel::Idle);
    let tracker = Arc::new(StatusTracker::new(source.clone(), POLL));
    let sink = RecordingSink::new();

    tracker.register_listener(sink.clone()).unwrap();
    let err = tracker
        .register_listener(sink.clone())
        .expect_err("second register must fail");
    assert!(matches!(err, Error::AlreadyRegistered));

    tracker.start();
    source.set(DecoderLevel::Active);
    settle().await;

    assert_eq!(sink.seen(), vec![DecoderLevel::Active]);

    tracker.stop().await;
}

#[tokio::test]
async fn unregister_of_unknown_listener_fails_without_side_effects() {
    let source = SettableSource::new(DecoderLevel::Idle);
    let tracker = Arc::new(StatusTracker::new(source.clone(), POLL));
    let registered = RecordingSink::new();
    let stranger = RecordingSink::new();

    tracker.register_listener(registered.clone()).unwrap();

    let stranger_dyn: Arc<dyn NotificationSink> = stranger;
    let err = tracker
        .unregister_listener(&stranger_dyn)
        .expect_err("unregister of unknown listener must fail");
    assert!(matches!(err, Error::ListenerNotFound));
    assert_eq!(tracker.listener_count(), 1);

    tracker.start();
    source.set(DecoderLevel::Active);
    settle().await;
    assert_eq!(registered.seen(), vec![DecoderLevel::Active]);

    tracker.stop().await;
}

#[tokio::test]
async fn unregistered_listener_stops_receiving() {
    let source = SettableSource::new(DecoderLevel::Idle);
    let tracker = Arc::new(StatusTracker::new(source.clone(), POLL));
    let leaving = RecordingSink::new();
    let staying = RecordingSink::new();
    tracker.register_listener(leaving.clone()).unwrap();
    tracker.register_listener(staying.clone()).unwrap();

    tracker.start();
    source.set(DecoderLevel::Active);
    settle().await;

    let leaving_dyn: Arc<dyn NotificationSink> = leaving.clone();
    tracker.unregister_listener(&leaving_dyn).unwrap();

    source.set(DecoderLevel::Paused);
    settle().await;

    assert_eq!(leaving.seen(), vec![DecoderLevel::Active]);
    assert_eq!(
        staying.seen(),
        vec![DecoderLevel::Active, DecoderLevel::Paused]
    );

    tracker.stop().await;
}

#[tokio::test]
async fn stop_halts_notifications_and_keeps_last_committed_value() {
    let source = SettableSource::new(DecoderLevel::Idle);
    let tracker = Arc::new(StatusTracker::new(source.clone(), POLL));
    let sink = RecordingSink::new();
    tracker.register_listener(sink.clone()).unwrap();

    tracker.start();
    source.set(DecoderLevel::Active);
    settle().await;
    assert_eq!(sink.seen(), vec![DecoderLevel::Active]);

    tracker.stop().await;

    // Level keeps changing at the source, but nothing may be delivered or
    // committed after stop has returned
    source.set(DecoderLevel::Paused);
    settle().await;
    assert_eq!(sink.seen(), vec![DecoderLevel::Active]);
    assert_eq!(tracker.current_status(), DecoderLevel::Active);
}

#[tokio::test]
async fn stop_without_start_is_a_noop_and_stop_is_idempotent() {
    let tracker = StatusTracker::new(SettableSource::new(DecoderLevel::Idle), POLL);

    tracker.stop().await;
    tracker.stop().await;
    assert_eq!(tracker.current_status(), DecoderLevel::Idle);
}

#[tokio::test]
async fn stop_returns_promptly_without_waiting_out_the_interval() {
    let tracker = Arc::new(StatusTracker::new(
        SettableSource::new(DecoderLevel::Idle),
        Duration::from_secs(60),
    ));
    tracker.start();

    // Give the poll task a moment to enter its interval wait
    tokio::time::sleep(Duration::from_millis(50)).await;

    tokio::time::timeout(Duration::from_secs(1), tracker.stop())
        .await
        .expect("stop must cancel the wait, not run it out");
}

/// Sink that re-enters the tracker's read path from inside its callback
struct ReentrantSink {
    tracker: Mutex<Option<Arc<StatusTracker>>>,
    observed: Mutex<Vec<(DecoderLevel, DecoderLevel)>>,
}

impl ReentrantSink {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            tracker: Mutex::new(None),
            observed: Mutex::new(Vec::new()),
        })
    }

    fn attach(&self, tracker: Arc<StatusTracker>) {
        *self.tracker.lock().unwrap() = Some(tracker);
    }
}

impl NotificationSink for ReentrantSink {
    fn on_decoder_status_changed(&self, status: DecoderLevel) {
        let tracker = self.tracker.lock().unwrap().clone();
        if let Some(tracker) = tracker {
            let read_back = tracker.current_status();
            self.observed.lock().unwrap().push((status, read_back));
        }
    }
}

#[tokio::test]
async fn current_status_is_safe_to_call_from_inside_a_callback() {
    let source = SettableSource::new(DecoderLevel::Idle);
    let tracker = Arc::new(StatusTracker::new(source.clone(), POLL));
    let sink = ReentrantSink::new();
    sink.attach(tracker.clone());
    tracker.register_listener(sink.clone()).unwrap();

    tracker.start();
    source.set(DecoderLevel::Active);
    settle().await;

    // The notification arrived (no deadlock) and the value read back from
    // inside the callback was the already-committed one
    let observed = sink.observed.lock().unwrap().clone();
    assert_eq!(observed, vec![(DecoderLevel::Active, DecoderLevel::Active)]);

    tracker.stop().await;
}
