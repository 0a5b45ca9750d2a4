use rand::SeedableRng;
use rand::rngs::StdRng;
use rcheckin::core::ids::{
    generate_qr_code, generate_unique_id, generate_unique_id_with, is_unique_id, new_record_id,
    unique_id_from_qr,
};
use std::collections::HashSet;

#[test]
fn test_unique_id_format() {
    for _ in 0..200 {
        let id = generate_unique_id();
        assert!(is_unique_id(&id), "bad id {id}");
        assert_eq!(id.len(), 13);
    }
}

#[test]
fn test_unique_id_with_seeded_rng_is_deterministic() {
    let a = generate_unique_id_with(&mut StdRng::seed_from_u64(7));
    let b = generate_unique_id_with(&mut StdRng::seed_from_u64(7));
    assert_eq!(a, b);
    assert!(is_unique_id(&a));
}

#[test]
fn test_is_unique_id_rejects_malformed() {
    assert!(!is_unique_id("EVT-abcd-EFGH"));
    assert!(!is_unique_id("EVT-ABCDE-FGH"));
    assert!(!is_unique_id("XYZ-ABCD-EFGH"));
    assert!(!is_unique_id(" EVT-ABCD-EFGH"));
    assert!(is_unique_id("EVT-A1B2-C3D4"));
}

#[test]
fn test_qr_code_round_trip() {
    let qr = generate_qr_code("EVT-A1B2-C3D4");
    assert_eq!(qr, "EVT-QR-EVT-A1B2-C3D4");
    assert_eq!(unique_id_from_qr(&qr), Some("EVT-A1B2-C3D4"));
    assert_eq!(unique_id_from_qr("EVT-A1B2-C3D4"), None);
}

#[test]
fn test_record_ids_are_distinct_uuids() {
    let ids: HashSet<String> = (0..100).map(|_| new_record_id()).collect();
    assert_eq!(ids.len(), 100);
    assert!(ids.iter().all(|id| uuid::Uuid::parse_str(id).is_ok()));
}
