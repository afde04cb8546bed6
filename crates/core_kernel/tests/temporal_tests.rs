//! Unit tests for clocks

use chrono::{Duration, TimeZone, Utc};
use core_kernel::{Clock, ManualClock, SharedClock};
use std::sync::Arc;

#[test]
fn test_shared_handle_observes_advance() {
    let start = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
    let clock = ManualClock::new(start);
    let shared: SharedClock = Arc::new(clock.clone());

    clock.advance(Duration::hours(2));

    assert_eq!(shared.now(), start + Duration::hours(2));
}

#[test]
fn test_manual_clock_does_not_drift() {
    let clock = ManualClock::starting_now();
    let first = clock.now();
    std::thread::sleep(std::time::Duration::from_millis(2));
    assert_eq!(clock.now(), first);
}
