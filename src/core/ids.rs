//! Attendee identifiers and QR payloads.

use rand::Rng;
use regex::Regex;
use std::sync::OnceLock;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const GROUP_LEN: usize = 4;

pub const UNIQUE_ID_PREFIX: &str = "EVT-";
pub const QR_PREFIX: &str = "EVT-QR-";

fn random_group<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..GROUP_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// `EVT-XXXX-XXXX`, each X uniform over `[A-Z0-9]`.
/// Collisions are possible and not checked.
pub fn generate_unique_id() -> String {
    generate_unique_id_with(&mut rand::thread_rng())
}

pub fn generate_unique_id_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    let a = random_group(rng);
    let b = random_group(rng);
    format!("{UNIQUE_ID_PREFIX}{a}-{b}")
}

/// QR payload for a unique id.
pub fn generate_qr_code(unique_id: &str) -> String {
    format!("{QR_PREFIX}{unique_id}")
}

/// Inverse of [`generate_qr_code`]; `None` when the prefix is missing.
pub fn unique_id_from_qr(payload: &str) -> Option<&str> {
    payload.strip_prefix(QR_PREFIX)
}

fn unique_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^EVT-[A-Z0-9]{4}-[A-Z0-9]{4}$").expect("valid regex"))
}

/// True for strings shaped like a generated unique id.
pub fn is_unique_id(s: &str) -> bool {
    unique_id_re().is_match(s)
}

/// Primary key of a new attendee record.
pub fn new_record_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
