use rcheckin::config::Config;
use rcheckin::config::migrate::{migrate_config, missing_keys};
use std::env;
use std::fs;
use std::path::PathBuf;

fn temp_conf(name: &str, content: &str) -> PathBuf {
    let mut path = env::temp_dir();
    path.push(format!("{name}_rcheckin.conf"));
    fs::write(&path, content).expect("write conf");
    path
}

#[test]
fn test_missing_keys_are_reported() {
    let path = temp_conf("cfg_missing", "database: /tmp/x.sqlite\ndefault_venue: Hall\n");
    let missing = missing_keys(&path).expect("check");

    assert!(missing.contains(&"default_event_name".to_string()));
    assert!(missing.contains(&"sync_delay_ms".to_string()));
    assert!(!missing.contains(&"database".to_string()));
    assert!(!missing.contains(&"default_venue".to_string()));
}

#[test]
fn test_migrate_fills_defaults_and_keeps_values() {
    let path = temp_conf(
        "cfg_migrate",
        "database: /tmp/x.sqlite\ndefault_venue: Hall\ncustom_key: kept\n",
    );

    let added = migrate_config(&path).expect("migrate");
    assert!(added.contains(&"export_dir".to_string()));
    assert!(missing_keys(&path).expect("check").is_empty());

    let content = fs::read_to_string(&path).expect("read");
    let cfg: Config = serde_yaml::from_str(&content).expect("parse");
    assert_eq!(cfg.database, "/tmp/x.sqlite");
    assert_eq!(cfg.default_venue, "Hall");
    assert_eq!(cfg.default_event_name, "My Event");
    assert_eq!(cfg.sync_delay_ms, 1500);
    assert!(content.contains("custom_key: kept"));

    // second run is a no-op
    assert!(migrate_config(&path).expect("migrate").is_empty());
}

#[test]
fn test_partial_config_takes_serde_defaults() {
    let cfg: Config = serde_yaml::from_str("default_event_name: RustConf\n").expect("parse");
    assert_eq!(cfg.default_event_name, "RustConf");
    assert_eq!(cfg.default_venue, "Virtual");
    assert_eq!(cfg.export_dir, ".");
    assert_eq!(cfg.date_format, "%Y-%m-%d %H:%M:%S");
}
