mod common;
use chrono::{Local, NaiveDate, TimeZone};
use common::{memory_pool, ready_store};
use rcheckin::core::calculator::report::build_report_summary;
use rcheckin::core::calculator::stats::calculate_stats;
use rcheckin::core::store::ScanAction;
use rcheckin::models::{AttendeeDraft, SettingsPatch};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
}

#[test]
fn test_stats_of_empty_collection() {
    let s = calculate_stats(&[]);
    assert_eq!(s.total_attendees, 0);
    assert_eq!(s.registered_attendees, 0);
    assert_eq!(s.lunch_distributed, 0);
    assert_eq!(s.kit_distributed, 0);
    assert_eq!(s.registration_rate, 0.0);
    assert!(s.daily_attendance.is_empty());
}

#[test]
fn test_registration_rate_forty_percent() {
    let pool = memory_pool();
    let mut store = ready_store(&pool);

    let drafts = (0..10)
        .map(|i| AttendeeDraft::new(format!("Person {i}"), format!("p{i}@example.com")))
        .collect();
    let created = store.add_attendees(drafts).expect("add");
    for a in created.iter().take(4) {
        store.register_attendee(&a.unique_id).expect("register");
    }
    store.distribute_lunch(&created[0].unique_id).expect("lunch");

    let s = calculate_stats(store.attendees());
    assert_eq!(s.total_attendees, 10);
    assert_eq!(s.registered_attendees, 4);
    assert_eq!(s.lunch_distributed, 1);
    assert_eq!(s.kit_distributed, 0);
    assert!((s.registration_rate - 40.0).abs() < 1e-9);
}

#[test]
fn test_daily_attendance_includes_zero_days() {
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

    let created = store
        .add_attendees(vec![
            AttendeeDraft::new("A", "a@example.com"),
            AttendeeDraft::new("B", "b@example.com"),
        ])
        .expect("add");

    let day1 = Local.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
    store
        .scan_at(&created[0].unique_id, ScanAction::CheckIn, day1)
        .expect("scan");

    let s = calculate_stats(store.attendees());
    assert_eq!(s.daily_attendance.len(), 3);
    assert_eq!(s.daily_attendance.get(&d(2024, 1, 1)), Some(&1));
    assert_eq!(s.daily_attendance.get(&d(2024, 1, 2)), Some(&0));
    assert_eq!(s.daily_attendance.get(&d(2024, 1, 3)), Some(&0));
}

#[test]
fn test_report_summary_rates_and_rankings() {
    let pool = memory_pool();
    let mut store = ready_store(&pool);

    let created = store
        .add_attendees(vec![
            AttendeeDraft::new("A", "a@example.com").with_company("Acme"),
            AttendeeDraft::new("B", "b@example.com").with_company("Acme"),
            AttendeeDraft::new("C", "c@example.com").with_company("Globex"),
            AttendeeDraft::new("D", "d@example.com"),
        ])
        .expect("add");

    let nine = Local.with_ymd_and_hms(2024, 6, 3, 9, 10, 0).unwrap();
    let nine_thirty = Local.with_ymd_and_hms(2024, 6, 3, 9, 30, 0).unwrap();
    let noon = Local.with_ymd_and_hms(2024, 6, 3, 12, 5, 0).unwrap();

    store
        .scan_at(&created[0].unique_id, ScanAction::CheckIn, nine)
        .expect("scan");
    store
        .scan_at(&created[1].unique_id, ScanAction::CheckIn, nine_thirty)
        .expect("scan");
    store
        .scan_at(&created[0].unique_id, ScanAction::Lunch, noon)
        .expect("scan");

    let r = build_report_summary(store.attendees());
    assert_eq!(r.stats.registered_attendees, 2);
    assert!((r.no_show_rate - 50.0).abs() < 1e-9);
    assert!((r.lunch_collection_rate - 50.0).abs() < 1e-9);
    assert_eq!(r.kit_collection_rate, 0.0);
    assert_eq!(r.registrations_by_hour.get(&9), Some(&2));
    assert_eq!(r.lunch_by_hour.get(&12), Some(&1));

    assert_eq!(r.top_companies[0], ("Acme".to_string(), 2));
    assert!(r.top_companies.contains(&("Not Specified".to_string(), 1)));
    assert_eq!(r.top_companies.len(), 3);
}

#[test]
fn test_report_summary_of_empty_collection() {
    let r = build_report_summary(&[]);
    assert_eq!(r.no_show_rate, 0.0);
    assert_eq!(r.lunch_collection_rate, 0.0);
    assert!(r.top_companies.is_empty());
    assert!(r.registrations_by_hour.is_empty());
}
