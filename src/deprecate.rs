//! Runtime deprecation signal for legacy accessor aliases.
//!
//! Deprecated methods forward to their replacements unchanged; the only
//! extra behavior is one `log::warn!` per call plus a process-wide counter
//! that callers (and tests) can observe.

use std::sync::atomic::{AtomicU64, Ordering};

static DEPRECATION_COUNT: AtomicU64 = AtomicU64::new(0);

/// Emit a single deprecation signal for a legacy entry point.
pub(crate) fn warn(old: &str, new: &str) {
    DEPRECATION_COUNT.fetch_add(1, Ordering::Relaxed);
    log::warn!("{old} is deprecated; use {new} instead");
}

/// Total number of deprecation signals emitted by this process.
///
/// Each call to a deprecated alias increments this by exactly one.
pub fn deprecation_count() -> u64 {
    DEPRECATION_COUNT.load(Ordering::Relaxed)
}
