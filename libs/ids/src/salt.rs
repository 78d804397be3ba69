//! Process-wide iteration-order salt
//!
//! Set iteration order is randomized per process run so no caller can come to
//! depend on it. The salt is computed exactly once, before any reader can
//! observe it, from a coarse time source; readers never synchronize. Tests
//! that need a stable order inject a fixed salt through
//! [`PublicIdSet::with_salt`](crate::PublicIdSet::with_salt) instead of
//! reading this one.

use std::time::{SystemTime, UNIX_EPOCH};

use once_cell::sync::Lazy;
use tracing::debug;

static PROCESS_SALT: Lazy<u64> = Lazy::new(|| {
    let seconds = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0);
    // Spread the low-entropy seconds value across the full word.
    let salt = seconds.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    debug!(salt, "iteration salt initialized");
    salt
});

/// Salt applied to set iteration start slot and scan direction.
pub(crate) fn process_salt() -> u64 {
    *PROCESS_SALT
}
