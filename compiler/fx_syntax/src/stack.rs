//! Stack growth for recursive tree algorithms.
//!
//! Cloning, printing and visitor dispatch recurse once per tree level.
//! Formulas produced by tools (long `&` concatenations, generated chains)
//! can nest tens of thousands of levels deep, so every recursive entry point
//! goes through [`ensure_sufficient_stack`].
//!
//! On native targets this grows the stack with `stacker` when less than
//! [`RED_ZONE`] bytes remain. On wasm the closure is called directly.

/// Remaining stack below which a new segment is allocated.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const NEW_SEGMENT: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if it is close to exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, NEW_SEGMENT, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests;
