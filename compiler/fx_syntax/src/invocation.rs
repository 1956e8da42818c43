//! Process-wide unique labels for call sites.
//!
//! Every call node gets a label of the form `Inv_<GUID>_<n>`. Downstream
//! passes use it to correlate a call expression with state they generate
//! for it (delegated query plans, for instance). Labels are unique for the
//! lifetime of the process, across threads and across trees. The fixed GUID
//! only keeps them from colliding with externally supplied identifiers.

use std::sync::atomic::{AtomicU64, Ordering};

/// Prefix shared by every invocation id.
pub const INVOCATION_ID_PREFIX: &str = "Inv_7339F426-B94F-4F32-937D-5B4D2D6C0C9A_";

static LAST_INVOCATION: AtomicU64 = AtomicU64::new(0);

/// Allocate the next invocation id. The first id ends in `_1`.
pub(crate) fn next_invocation_id() -> Box<str> {
    let n = LAST_INVOCATION.fetch_add(1, Ordering::Relaxed) + 1;
    format!("{INVOCATION_ID_PREFIX}{n}").into_boxed_str()
}

#[cfg(test)]
mod tests;
