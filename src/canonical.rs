//! Canonical serialization for deterministic fingerprints.
//!
//! Two runs over the same declaration must yield byte-identical output. The
//! computed types only use `Vec` (already canonically sorted) and `BTreeMap`,
//! so their JSON form is stable and can be hashed directly.

use serde::Serialize;
use xxhash_rust::xxh64::xxh64;

/// Seed for all fingerprints.
const FINGERPRINT_SEED: u64 = 0;

/// Serialize a value to canonical JSON bytes.
pub fn to_canonical_bytes<T: Serialize>(value: &T) -> Vec<u8> {
    serde_json::to_vec(value).expect("Canonical serialization failed")
}

/// Compute canonical hash of a serializable value.
pub fn canonical_hash<T: Serialize>(value: &T) -> u64 {
    xxh64(&to_canonical_bytes(value), FINGERPRINT_SEED)
}

/// Compute canonical hash and return as hex string.
pub fn canonical_hash_hex<T: Serialize>(value: &T) -> String {
    format!("{:016x}", canonical_hash(value))
}
