use super::*;
use rustc_hash::FxHashSet;

#[test]
fn test_ids_share_prefix_and_differ() {
    let a = next_invocation_id();
    let b = next_invocation_id();
    assert!(a.starts_with(INVOCATION_ID_PREFIX));
    assert!(b.starts_with(INVOCATION_ID_PREFIX));
    assert_ne!(a, b);
}

#[test]
fn test_counter_suffix_is_numeric() {
    let id = next_invocation_id();
    let suffix = &id[INVOCATION_ID_PREFIX.len()..];
    assert!(suffix.parse::<u64>().is_ok_and(|n| n >= 1), "suffix {suffix:?}");
}

#[test]
fn test_ids_unique_across_threads() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 500;

    let ids: Vec<Box<str>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| scope.spawn(|| (0..PER_THREAD).map(|_| next_invocation_id()).collect::<Vec<_>>()))
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
            .collect()
    });

    assert_eq!(ids.len(), THREADS * PER_THREAD);
    let unique: FxHashSet<&str> = ids.iter().map(AsRef::as_ref).collect();
    assert_eq!(unique.len(), ids.len());
}
