mod common;
use chrono::{Duration, Local, NaiveDate, TimeZone};
use common::{memory_pool, ready_store, setup_test_db};
use rcheckin::core::ids::{QR_PREFIX, is_unique_id};
use rcheckin::core::store::{AttendeeStore, ScanAction, ScanOutcome, StoreOptions};
use rcheckin::core::sync::SyncStatusTracker;
use rcheckin::db::kv::{self, KEY_ATTENDEES, KEY_EVENT_SETTINGS};
use rcheckin::db::pool::DbPool;
use rcheckin::errors::AppError;
use rcheckin::models::{AttendeeDraft, AttendeePatch, EventSettings, SettingsPatch};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
}

fn drafts() -> Vec<AttendeeDraft> {
    vec![
        AttendeeDraft::new("Ada Lovelace", "ada@example.com").with_company("ACME Corp"),
        AttendeeDraft::new("Alan Turing", "alan@example.com").with_phone("555-0101"),
        AttendeeDraft::new("Grace Hopper", "grace@example.com").with_company("Navy"),
    ]
}

#[test]
fn test_add_generates_identifiers() {
    let pool = memory_pool();
    let mut store = ready_store(&pool);

    let created = store.add_attendees(drafts()).expect("add");
    assert_eq!(created.len(), 3);
    assert_eq!(store.attendees().len(), 3);

    for a in &created {
        assert!(is_unique_id(&a.unique_id), "bad id {}", a.unique_id);
        assert_eq!(a.qr_code_data, format!("{QR_PREFIX}{}", a.unique_id));
        assert!(!a.is_registered && !a.has_collected_lunch && !a.has_collected_kit);
        assert_eq!(a.attendance.len(), 1);
        assert_eq!(a.attendance.values().next(), Some(&false));
    }

    assert_ne!(created[0].id, created[1].id);
    assert_eq!(store.attendees()[0].name, "Ada Lovelace");
    assert_eq!(store.attendees()[2].name, "Grace Hopper");
}

#[test]
fn test_add_keeps_supplied_unique_id() {
    let pool = memory_pool();
    let mut store = ready_store(&pool);

    let created = store
        .add_attendees(vec![
            AttendeeDraft::new("Linus", "linus@example.com").with_unique_id("CUSTOM-1"),
        ])
        .expect("add");

    assert_eq!(created[0].unique_id, "CUSTOM-1");
    assert_eq!(created[0].qr_code_data, "EVT-QR-CUSTOM-1");
    assert!(store.get_attendee_by_unique_id("CUSTOM-1").is_some());
    assert!(store.get_attendee_by_qr_code("EVT-QR-CUSTOM-1").is_some());
}

#[test]
fn test_add_seeds_attendance_for_multi_day_events() {
    let pool = memory_pool();
    let mut store = ready_store(&pool);

    store
        .update_event_settings(SettingsPatch {
            start_date: Some(d(2024, 1, 1)),
            end_date: Some(d(2024, 1, 3)),
            is_multi_day: Some(true),
            ..Default::default()
        })
        .expect("settings");

    let created = store.add_attendees(drafts()).expect("add");
    let days: Vec<NaiveDate> = created[0].attendance.keys().copied().collect();
    assert_eq!(days, vec![d(2024, 1, 1), d(2024, 1, 2), d(2024, 1, 3)]);
    assert!(created[0].attendance.values().all(|present| !present));
}

#[test]
fn test_add_empty_is_noop() {
    let pool = memory_pool();
    let mut store = ready_store(&pool);

    let created = store.add_attendees(Vec::new()).expect("add");
    assert!(created.is_empty());
    assert_eq!(store.pending_writes(), 0);
    assert_eq!(store.sync().borrow().pulses_started(), 0);
}

#[test]
fn test_register_twice_reports_already_done() {
    let pool = memory_pool();
    let mut store = ready_store(&pool);
    let uid = store.add_attendees(drafts()).expect("add")[0].unique_id.clone();

    let t1 = Local.with_ymd_and_hms(2024, 1, 1, 9, 15, 0).unwrap();
    let t2 = t1 + Duration::minutes(5);

    let first = store.scan_at(&uid, ScanAction::CheckIn, t1).expect("scan");
    let ScanOutcome::Updated(a) = first else {
        panic!("expected Updated, got {first:?}");
    };
    assert!(a.is_registered);
    assert_eq!(a.registration_time, Some(t1));
    assert_eq!(a.attendance.get(&d(2024, 1, 1)), Some(&true));

    let second = store.scan_at(&uid, ScanAction::CheckIn, t2).expect("scan");
    let ScanOutcome::AlreadyDone(a) = second else {
        panic!("expected AlreadyDone, got {second:?}");
    };
    assert_eq!(a.registration_time, Some(t1));
    assert_eq!(
        store.get_attendee_by_unique_id(&uid).unwrap().registration_time,
        Some(t1)
    );
}

#[test]
fn test_register_by_qr_payload() {
    let pool = memory_pool();
    let mut store = ready_store(&pool);
    let qr = store.add_attendees(drafts()).expect("add")[1].qr_code_data.clone();

    let outcome = store.register_attendee(&qr).expect("register");
    assert!(matches!(outcome, ScanOutcome::Updated(_)));
    assert_eq!(outcome.attendee().map(|a| a.name.as_str()), Some("Alan Turing"));
}

#[test]
fn test_unknown_token_changes_nothing() {
    let pool = memory_pool();
    let mut store = ready_store(&pool);
    store.add_attendees(drafts()).expect("add");
    store.flush(&pool.conn).expect("flush");
    let pulses = store.sync().borrow().pulses_started();

    let outcome = store.register_attendee("EVT-NOPE-NOPE").expect("register");
    assert_eq!(outcome, ScanOutcome::NotFound);
    assert_eq!(store.pending_writes(), 0);
    assert_eq!(store.sync().borrow().pulses_started(), pulses);
    assert!(store.attendees().iter().all(|a| !a.is_registered));
}

#[test]
fn test_distribution_does_not_require_checkin() {
    let pool = memory_pool();
    let mut store = ready_store(&pool);
    let uid = store.add_attendees(drafts()).expect("add")[2].unique_id.clone();

    let lunch = store.distribute_lunch(&uid).expect("lunch");
    let kit = store.distribute_kit(&uid).expect("kit");

    let a = kit.attendee().expect("found");
    assert!(matches!(lunch, ScanOutcome::Updated(_)));
    assert!(a.has_collected_lunch && a.lunch_collection_time.is_some());
    assert!(a.has_collected_kit && a.kit_collection_time.is_some());
    assert!(!a.is_registered);

    assert!(matches!(
        store.distribute_lunch(&uid).expect("lunch"),
        ScanOutcome::AlreadyDone(_)
    ));
}

#[test]
fn test_search_blank_and_case_insensitive() {
    let pool = memory_pool();
    let mut store = ready_store(&pool);
    store.add_attendees(drafts()).expect("add");

    let all: Vec<&str> = store
        .search_attendees("   ")
        .iter()
        .map(|a| a.name.as_str())
        .collect();
    assert_eq!(all, vec!["Ada Lovelace", "Alan Turing", "Grace Hopper"]);

    let acme = store.search_attendees("ACME");
    assert_eq!(acme.len(), 1);
    assert_eq!(acme[0].name, "Ada Lovelace");

    assert_eq!(store.search_attendees("0101").len(), 1);
    assert_eq!(store.search_attendees("EXAMPLE.COM").len(), 3);
    assert!(store.search_attendees("nobody").is_empty());

    let uid = store.attendees()[1].unique_id.to_lowercase();
    assert_eq!(store.search_attendees(&uid)[0].name, "Alan Turing");
}

#[test]
fn test_update_attendee_merges_contact_fields() {
    let pool = memory_pool();
    let mut store = ready_store(&pool);
    let created = store.add_attendees(drafts()).expect("add");
    let id = created[0].id.clone();
    store.register_attendee(&created[0].unique_id).expect("register");

    let updated = store
        .update_attendee(
            &id,
            AttendeePatch {
                email: Some("ada@lovelace.org".into()),
                extra: [("Diet".to_string(), "vegan".to_string())].into(),
                ..Default::default()
            },
        )
        .expect("update");
    assert!(updated);

    let a = store.get_attendee_by_id(&id).expect("present");
    assert_eq!(a.name, "Ada Lovelace");
    assert_eq!(a.email, "ada@lovelace.org");
    assert_eq!(a.extra.get("Diet").map(String::as_str), Some("vegan"));
    assert!(a.is_registered);

    let missing = store
        .update_attendee("no-such-id", AttendeePatch::default())
        .expect("update");
    assert!(!missing);
}

#[test]
fn test_settings_multi_day_recomputes_days() {
    let pool = memory_pool();
    let mut store = ready_store(&pool);

    let s = store
        .update_event_settings(SettingsPatch {
            name: Some("RustConf".into()),
            start_date: Some(d(2024, 1, 1)),
            end_date: Some(d(2024, 1, 3)),
            is_multi_day: Some(true),
            ..Default::default()
        })
        .expect("settings")
        .clone();
    assert_eq!(s.name, "RustConf");
    assert_eq!(s.days, vec![d(2024, 1, 1), d(2024, 1, 2), d(2024, 1, 3)]);

    // start after end collapses to the start day
    let s = store
        .update_event_settings(SettingsPatch {
            start_date: Some(d(2024, 2, 10)),
            end_date: Some(d(2024, 2, 1)),
            is_multi_day: Some(true),
            ..Default::default()
        })
        .expect("settings")
        .clone();
    assert_eq!(s.days, vec![d(2024, 2, 10)]);

    let s = store
        .update_event_settings(SettingsPatch {
            start_date: Some(d(2024, 3, 1)),
            end_date: Some(d(2024, 3, 5)),
            is_multi_day: Some(false),
            ..Default::default()
        })
        .expect("settings")
        .clone();
    assert!(!s.is_multi_day);
    assert_eq!(s.days, vec![d(2024, 3, 1)]);

    // moving the start of a single-day event moves its only day
    let s = store
        .update_event_settings(SettingsPatch {
            start_date: Some(d(2024, 4, 2)),
            ..Default::default()
        })
        .expect("settings")
        .clone();
    assert_eq!(s.days, vec![d(2024, 4, 2)]);
}

#[test]
fn test_settings_change_does_not_pulse_sync() {
    let pool = memory_pool();
    let mut store = ready_store(&pool);

    store
        .update_event_settings(SettingsPatch {
            venue: Some("Hall B".into()),
            ..Default::default()
        })
        .expect("settings");

    assert_eq!(store.pending_writes(), 1);
    assert_eq!(store.sync().borrow().pulses_started(), 0);
}

#[test]
fn test_attendee_changes_pulse_sync_and_coalesce_writes() {
    let pool = memory_pool();
    let mut store = ready_store(&pool);

    let uid = store.add_attendees(drafts()).expect("add")[0].unique_id.clone();
    store.register_attendee(&uid).expect("register");
    store.distribute_lunch(&uid).expect("lunch");

    assert_eq!(store.pending_writes(), 1);
    {
        let sync = store.sync().borrow();
        assert_eq!(sync.pulses_started(), 3);
        assert!(sync.status().syncing);
    }

    assert_eq!(store.flush(&pool.conn).expect("flush"), 1);
    assert_eq!(store.pending_writes(), 0);

    assert_eq!(store.sync().borrow_mut().settle(), 3);
    let sync = store.sync().borrow();
    assert!(!sync.status().syncing);
    assert!(sync.status().last_synced.is_some());
}

#[test]
fn test_end_event_archives_and_resets() {
    let pool = memory_pool();
    let mut store = ready_store(&pool);

    store
        .update_event_settings(SettingsPatch {
            name: Some("Tech Summit".into()),
            venue: Some("Berlin".into()),
            ..Default::default()
        })
        .expect("settings");
    let created = store.add_attendees(drafts()).expect("add");
    store.register_attendee(&created[0].unique_id).expect("register");

    let archived = store.end_event().expect("end event");

    assert_eq!(archived.settings.name, "Tech Summit");
    assert_eq!(archived.stats.total_attendees, 3);
    assert_eq!(archived.stats.registered_attendees, 1);
    assert!(archived.csv_data.starts_with("Name,Email,Phone,Company,UniqueID,CheckedIn"));
    assert!(archived.csv_data.contains("Ada Lovelace"));
    assert_eq!(archived.report_file_name(), "Tech_Summit_final_report.csv");

    assert!(store.attendees().is_empty());
    assert_eq!(store.settings().name, "My Event");
    assert_eq!(store.settings().venue, "Virtual");
    assert_eq!(store.archived_events().len(), 1);

    let prefix = &archived.id[..8];
    assert_eq!(store.get_archived_event(prefix).map(|e| &e.id), Some(&archived.id));
    assert!(store.get_archived_event("").is_none());
}

#[test]
fn test_end_event_uses_configured_defaults() {
    let pool = memory_pool();
    let sync = SyncStatusTracker::with_delay_ms(true, 10).shared();
    let options = StoreOptions {
        default_event_name: "Untitled".into(),
        default_venue: "Main hall".into(),
        ..StoreOptions::default()
    };
    let mut store = AttendeeStore::open(&pool.conn, options, sync);

    store.end_event().expect("end event");
    assert_eq!(store.settings().name, "Untitled");
    assert_eq!(store.settings().venue, "Main hall");
}

#[test]
fn test_operations_before_load_are_rejected() {
    let sync = SyncStatusTracker::with_delay_ms(true, 1500).shared();
    let mut store = AttendeeStore::new(StoreOptions::default(), sync);

    assert!(store.is_loading());
    assert!(matches!(
        store.add_attendees(drafts()),
        Err(AppError::StoreNotReady)
    ));
    assert!(matches!(
        store.register_attendee("EVT-AAAA-BBBB"),
        Err(AppError::StoreNotReady)
    ));
    assert!(matches!(store.end_event(), Err(AppError::StoreNotReady)));
}

#[test]
fn test_persisted_state_survives_reopen() {
    let db_path = setup_test_db("store_reopen");

    let (uid, settings) = {
        let pool = DbPool::open_initialized(&db_path).expect("open");
        let mut store = ready_store(&pool);
        let mut ds = drafts();
        ds[0].extra.insert("T-Shirt".into(), "M".into());
        let uid = store.add_attendees(ds).expect("add")[0].unique_id.clone();
        store.register_attendee(&uid).expect("register");
        let settings = store
            .update_event_settings(SettingsPatch {
                name: Some("Persisted".into()),
                ..Default::default()
            })
            .expect("settings")
            .clone();
        store.flush(&pool.conn).expect("flush");
        (uid, settings)
    };

    let pool = DbPool::open_initialized(&db_path).expect("reopen");
    let store = ready_store(&pool);

    assert_eq!(store.attendees().len(), 3);
    assert_eq!(store.settings(), &settings);

    let a = store.get_attendee_by_unique_id(&uid).expect("present");
    assert!(a.is_registered);
    assert!(a.registration_time.is_some());
    assert_eq!(a.extra.get("T-Shirt").map(String::as_str), Some("M"));
}

#[test]
fn test_malformed_entry_is_ignored_and_logged() {
    let pool = memory_pool();
    kv::set_raw(&pool.conn, KEY_ATTENDEES, "{not json").expect("seed");

    let settings = EventSettings::with_defaults("Seeded", "Online");
    kv::set_item(&pool.conn, KEY_EVENT_SETTINGS, &settings).expect("seed settings");

    let store = ready_store(&pool);
    assert!(store.attendees().is_empty());
    assert_eq!(store.settings().name, "Seeded");
    assert!(!store.is_loading());

    let logged: i64 = pool
        .conn
        .query_row(
            "SELECT COUNT(*) FROM log WHERE operation = 'load_error' AND target = ?1",
            [KEY_ATTENDEES],
            |row| row.get(0),
        )
        .expect("count");
    assert_eq!(logged, 1);
}

#[test]
fn test_missing_entries_yield_defaults() {
    let pool = memory_pool();
    kv::set_item(&pool.conn, KEY_EVENT_SETTINGS, &EventSettings::default()).expect("seed");
    assert!(kv::remove_item(&pool.conn, KEY_EVENT_SETTINGS).expect("remove"));

    let store = ready_store(&pool);
    assert!(store.attendees().is_empty());
    assert!(store.archived_events().is_empty());
    assert_eq!(store.settings().name, "My Event");
    assert!(!store.settings().is_multi_day);
}

#[test]
fn test_flush_failure_keeps_queue() {
    let pool = memory_pool();
    let mut store = ready_store(&pool);
    store.add_attendees(drafts()).expect("add");

    pool.conn
        .execute_batch("DROP TABLE kv_store;")
        .expect("drop table");

    let err = store.flush(&pool.conn).expect_err("flush must fail");
    assert!(matches!(err, AppError::Persistence(_)));
    assert_eq!(store.pending_writes(), 1);
    assert_eq!(store.attendees().len(), 3);
}

#[test]
fn test_persist_queue_coalesces_per_key() {
    use rcheckin::core::persist::PersistQueue;

    let pool = memory_pool();
    let mut queue = PersistQueue::new();
    assert!(queue.is_empty());

    queue.enqueue(KEY_ATTENDEES, &vec!["first"]).expect("enqueue");
    queue.enqueue(KEY_EVENT_SETTINGS, &EventSettings::default()).expect("enqueue");
    queue.enqueue(KEY_ATTENDEES, &Vec::<String>::new()).expect("enqueue");

    assert_eq!(queue.len(), 2);
    assert_eq!(queue.coalesced(), 1);
    assert!(queue.is_queued(KEY_ATTENDEES));

    assert_eq!(queue.flush(&pool.conn).expect("flush"), 2);
    assert!(queue.is_empty());
    assert_eq!(
        kv::get_raw(&pool.conn, KEY_ATTENDEES).expect("read").as_deref(),
        Some("[]")
    );
}

#[test]
fn test_archive_lookup_rejects_shared_prefix() {
    use rcheckin::db::kv::KEY_ARCHIVED_EVENTS;

    let pool = memory_pool();
    let mut store = ready_store(&pool);
    store.end_event().expect("first event");
    store.end_event().expect("second event");
    store.flush(&pool.conn).expect("flush");

    let mut archived: Vec<serde_json::Value> = kv::get_item(&pool.conn, KEY_ARCHIVED_EVENTS)
        .expect("read")
        .expect("archive entry");
    archived[0]["id"] = "abcd-0001".into();
    archived[1]["id"] = "abcd-0002".into();
    kv::set_item(&pool.conn, KEY_ARCHIVED_EVENTS, &archived).expect("write");

    let store = ready_store(&pool);
    assert!(store.get_archived_event("abcd").is_none());
    assert!(store.get_archived_event("abcd-").is_none());
    assert_eq!(
        store.get_archived_event("abcd-0002").map(|e| e.id.as_str()),
        Some("abcd-0002")
    );
    assert_eq!(
        store.get_archived_event("abcd-0001").map(|e| e.id.as_str()),
        Some("abcd-0001")
    );
}
