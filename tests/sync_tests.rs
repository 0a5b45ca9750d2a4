use chrono::{Duration, Local, TimeZone};
use rcheckin::core::sync::SyncStatusTracker;

fn t0() -> chrono::DateTime<Local> {
    Local.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
}

#[test]
fn test_offline_trigger_only_counts_pending() {
    let mut sync = SyncStatusTracker::with_delay_ms(false, 1500);

    sync.trigger_sync_at(t0());
    sync.trigger_sync_at(t0());

    assert!(!sync.status().syncing);
    assert_eq!(sync.status().pending_changes, 2);
    assert_eq!(sync.pulses_started(), 0);
    assert!(!sync.has_in_flight());
}

#[test]
fn test_going_online_with_pending_triggers_one_pulse() {
    let mut sync = SyncStatusTracker::with_delay_ms(false, 1500);
    sync.trigger_sync_at(t0());
    sync.trigger_sync_at(t0());

    sync.set_online_at(true, t0());
    assert!(sync.is_online());
    assert_eq!(sync.pulses_started(), 1);
    assert!(sync.status().syncing);

    // not due yet
    assert_eq!(sync.poll(t0() + Duration::milliseconds(1000)), 0);
    assert!(sync.status().syncing);

    let deadline = t0() + Duration::milliseconds(1500);
    assert_eq!(sync.poll(deadline), 1);
    assert!(!sync.status().syncing);
    assert_eq!(sync.status().pending_changes, 0);
    assert_eq!(sync.status().last_synced, Some(deadline));
}

#[test]
fn test_going_online_without_pending_does_nothing() {
    let mut sync = SyncStatusTracker::with_delay_ms(false, 1500);
    sync.set_online_at(true, t0());
    assert_eq!(sync.pulses_started(), 0);
    assert!(!sync.status().syncing);

    // online → online is not a transition
    sync.set_online_at(true, t0());
    assert_eq!(sync.pulses_started(), 0);
}

#[test]
fn test_going_offline_keeps_in_flight_pulses() {
    let mut sync = SyncStatusTracker::with_delay_ms(true, 1500);
    sync.trigger_sync_at(t0());
    sync.set_online_at(false, t0());

    assert!(sync.has_in_flight());
    assert_eq!(sync.settle(), 1);
    assert!(sync.status().last_synced.is_some());
}

#[test]
fn test_overlapping_pulses_last_completion_wins() {
    let mut sync = SyncStatusTracker::with_delay_ms(true, 1500);
    sync.trigger_sync_at(t0());
    sync.trigger_sync_at(t0() + Duration::seconds(1));
    assert_eq!(sync.pulses_started(), 2);

    assert_eq!(sync.poll(t0() + Duration::milliseconds(1600)), 1);
    assert!(sync.has_in_flight());
    assert_eq!(
        sync.status().last_synced,
        Some(t0() + Duration::milliseconds(1500))
    );

    assert_eq!(sync.poll(t0() + Duration::seconds(5)), 1);
    assert!(!sync.has_in_flight());
    assert_eq!(
        sync.status().last_synced,
        Some(t0() + Duration::milliseconds(2500))
    );
}

#[test]
fn test_settle_completes_everything() {
    let mut sync = SyncStatusTracker::with_delay_ms(true, 60_000);
    sync.trigger_sync_at(t0());
    sync.trigger_sync_at(t0());
    sync.trigger_sync_at(t0());

    assert_eq!(sync.settle(), 3);
    assert!(!sync.status().syncing);
    assert_eq!(sync.settle(), 0);
}

#[test]
fn test_reconnect_with_wall_clock_completes_on_poll() {
    let mut sync = SyncStatusTracker::with_delay_ms(false, 0);
    sync.trigger_sync();
    assert_eq!(sync.status().pending_changes, 1);

    sync.set_online(true);
    assert!(sync.status().syncing);

    assert_eq!(sync.poll(Local::now() + Duration::seconds(1)), 1);
    assert!(!sync.status().syncing);
    assert_eq!(sync.status().pending_changes, 0);
    assert!(sync.status().last_synced.is_some());
}

#[test]
fn test_huge_delay_does_not_overflow() {
    for delay_ms in [u64::MAX, u64::MAX / 2, 1 << 62] {
        let mut sync = SyncStatusTracker::with_delay_ms(true, delay_ms);
        sync.trigger_sync_at(t0());
        assert!(sync.status().syncing);

        // the deadline saturates to the trigger time
        assert_eq!(sync.poll(t0()), 1, "delay {delay_ms}");
        assert_eq!(sync.status().last_synced, Some(t0()));
        assert!(!sync.status().syncing);
    }
}
