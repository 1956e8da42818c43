use super::*;

#[test]
fn test_returns_closure_result() {
    assert_eq!(ensure_sufficient_stack(|| 42), 42);
}

#[test]
fn test_deep_recursion_survives() {
    fn nest(n: u32) -> u32 {
        ensure_sufficient_stack(|| if n == 0 { 0 } else { nest(n - 1) + 1 })
    }

    // Deep enough to overflow a default thread stack without growth.
    assert_eq!(nest(200_000), 200_000);
}
