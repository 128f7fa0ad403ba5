//! Name hashing for item identity
//!
//! Configuration names are never stored. Each name is hashed to a fixed
//! 32-character lowercase hex digest which serves as the item's durable
//! identity, so a store can resolve a given name to its slot but cannot
//! enumerate items by original name.

/// Length of a name digest in hex characters (128 bits).
pub(crate) const DIGEST_LEN: usize = 32;

/// Hashes a configuration name to its fixed-length hex digest.
///
/// Deterministic: the same name always yields the same digest.
pub(crate) fn digest(name: &str) -> String {
    let hash = blake3::hash(name.as_bytes());
    hash.to_hex()[..DIGEST_LEN].to_string()
}
