//! Device/browser fingerprint: a non-cryptographic identifying hash used to
//! tell anonymous visitors apart. Collisions are tolerated.

use pagelog_core::constants::{FINGERPRINT_HASH_WIDTH, FINGERPRINT_LEN, UNKNOWN_FIELD};
use pagelog_core::models::DeviceProfile;

use crate::base36::to_base36;

const SEPARATOR: &str = "|";

/// `key:value` pairs in fixed order, joined by `|`. Missing values read `unknown`.
pub fn fingerprint_source(profile: &DeviceProfile) -> String {
    let or_unknown = |v: Option<String>| v.unwrap_or_else(|| UNKNOWN_FIELD.to_string());
    let fields = [
        ("userAgent", or_unknown(profile.user_agent.clone())),
        ("language", or_unknown(profile.language.clone())),
        ("screenResolution", or_unknown(profile.screen_resolution())),
        ("colorDepth", or_unknown(profile.color_depth.map(|d| d.to_string()))),
        ("timezone", or_unknown(profile.timezone.clone())),
        (
            "hardwareConcurrency",
            or_unknown(profile.hardware_concurrency.map(|c| c.to_string())),
        ),
        ("deviceMemory", or_unknown(profile.device_memory.clone())),
    ];
    fields
        .iter()
        .map(|(k, v)| format!("{k}:{v}"))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// `hash = hash * 31 + unit` over UTF-16 code units, wrapping at 32 bits signed.
pub fn rolling_hash(source: &str) -> i32 {
    source
        .encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(unit as i32))
}

/// Fixed-length fingerprint for a device profile.
///
/// The absolute hash is base-36 encoded, left-padded with `0` to 10
/// characters, then right-padded with `0` to exactly 32.
pub fn generate_fingerprint(profile: &DeviceProfile) -> String {
    let hash = rolling_hash(&fingerprint_source(profile));
    let encoded = to_base36(u64::from(hash.unsigned_abs()));
    let mut fingerprint = format!("{encoded:0>width$}", width = FINGERPRINT_HASH_WIDTH);
    fingerprint.truncate(FINGERPRINT_LEN);
    format!("{fingerprint:0<width$}", width = FINGERPRINT_LEN)
}
