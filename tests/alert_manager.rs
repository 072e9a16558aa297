//! Integration tests for the AlertManager cooldown behavior
//!
//! Time is paused and advanced manually, so cooldown windows are exact and
//! the tests run instantly at any frame rate.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use banken::{
    actions::{AlertDispatcher, AlertSink, error::AlertDispatchError},
    engine::alert_manager::{AlertManager, DEFAULT_WARNING_TEXT},
    models::Detection,
    test_helpers::{DetectionBuilder, MonitoringConfigBuilder},
};
use tokio::time::advance;

#[derive(Default)]
struct RecordingSink {
    sent: Arc<Mutex<Vec<String>>>,
}

#[async_trait::async_trait]
impl AlertSink for RecordingSink {
    async fn emit(&self, text: &str) -> Result<(), AlertDispatchError> {
        self.sent.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

fn recording_manager() -> (AlertManager, Arc<Mutex<Vec<String>>>) {
    let sink = RecordingSink::default();
    let sent = Arc::clone(&sink.sent);
    let sink: Arc<dyn AlertSink> = Arc::new(sink);
    let dispatcher = Arc::new(AlertDispatcher::new(Arc::clone(&sink), sink));
    (AlertManager::new(dispatcher), sent)
}

fn person() -> Detection {
    DetectionBuilder::new().build()
}

async fn drain_dispatch_tasks() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn exactly_one_alert_fires_per_cooldown_window() {
    let config = MonitoringConfigBuilder::new().cooldown(Duration::from_secs(5)).build();
    let (mut manager, _sent) = recording_manager();

    // Qualifying detections on every frame at 5 fps for 10 seconds.
    let mut fired = 0;
    for _ in 0..=50 {
        if manager.process(&[person()], &config) {
            fired += 1;
        }
        advance(Duration::from_millis(200)).await;
    }
    assert_eq!(fired, 3, "alerts at t=0, t=5, t=10");
}

#[tokio::test(start_paused = true)]
async fn cooldown_windows_are_wall_clock_not_frame_count() {
    let config = MonitoringConfigBuilder::new().cooldown(Duration::from_secs(5)).build();

    // The same 10 seconds at a different frame rate fires the same number
    // of alerts.
    let (mut manager, _sent) = recording_manager();
    let mut fired = 0;
    for _ in 0..=20 {
        if manager.process(&[person()], &config) {
            fired += 1;
        }
        advance(Duration::from_millis(500)).await;
    }
    assert_eq!(fired, 3);
}

#[tokio::test(start_paused = true)]
async fn zero_cooldown_still_enforces_the_one_second_floor() {
    let config = MonitoringConfigBuilder::new().cooldown(Duration::ZERO).build();
    let (mut manager, _sent) = recording_manager();

    let mut fired = 0;
    for _ in 0..9 {
        if manager.process(&[person()], &config) {
            fired += 1;
        }
        advance(Duration::from_millis(250)).await;
    }
    // 2.25 seconds of frames: t=0, t=1, t=2.
    assert_eq!(fired, 3);
}

#[tokio::test(start_paused = true)]
async fn second_alert_two_seconds_later_is_suppressed_but_six_seconds_fires() {
    let config = MonitoringConfigBuilder::new().cooldown(Duration::from_secs(5)).build();
    let (mut manager, _sent) = recording_manager();

    assert!(manager.process(&[person()], &config), "first request fires");

    advance(Duration::from_secs(2)).await;
    assert!(!manager.process(&[person()], &config), "+2s is inside the window");

    advance(Duration::from_secs(4)).await;
    assert!(manager.process(&[person()], &config), "+6s from the first fires");
}

#[tokio::test(start_paused = true)]
async fn empty_frames_do_not_reset_the_window() {
    let config = MonitoringConfigBuilder::new().cooldown(Duration::from_secs(5)).build();
    let (mut manager, _sent) = recording_manager();

    assert!(manager.process(&[person()], &config));

    // A stretch of empty frames inside the window.
    for _ in 0..4 {
        advance(Duration::from_secs(1)).await;
        assert!(!manager.process(&[], &config), "empty frames never fire");
    }

    // One second later the window has elapsed, measured from the first
    // alert, not from any empty frame.
    advance(Duration::from_secs(1)).await;
    assert!(manager.process(&[person()], &config));
}

#[tokio::test(start_paused = true)]
async fn composed_message_counts_repeated_labels() {
    let config = MonitoringConfigBuilder::new().build();
    let (mut manager, sent) = recording_manager();

    assert!(manager.process(&[person(), person()], &config));
    drain_dispatch_tasks().await;

    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].contains("person 2件"), "got: {}", sent[0]);
    assert!(sent[0].starts_with(DEFAULT_WARNING_TEXT));
}

#[tokio::test(start_paused = true)]
async fn single_detection_message_uses_the_bare_label() {
    let config = MonitoringConfigBuilder::new().warning_text("立入禁止です").build();
    let (mut manager, sent) = recording_manager();

    assert!(manager.process(&[person()], &config));
    drain_dispatch_tasks().await;

    let sent = sent.lock().unwrap();
    assert_eq!(sent.as_slice(), ["立入禁止です（person）"]);
}
