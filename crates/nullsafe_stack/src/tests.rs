use super::*;

#[test]
fn test_deep_recursion() {
    // This would overflow without stack growth
    fn deep_recurse(n: u64) -> u64 {
        ensure_sufficient_stack(|| if n == 0 { 0 } else { deep_recurse(n - 1) + 1 })
    }

    assert_eq!(deep_recurse(100_000), 100_000);
}

#[test]
fn test_works_with_result_type() {
    let result: Result<i32, &str> = ensure_sufficient_stack(|| Ok(123));
    assert_eq!(result, Ok(123));
}

#[test]
fn test_unlimited_accepts_any_depth() {
    assert_eq!(DepthLimit::UNLIMITED.check(usize::MAX), Ok(()));
    assert_eq!(DepthLimit::UNLIMITED.max(), None);
}

#[test]
fn test_limit_is_inclusive() {
    let limit = DepthLimit::at_most(3);
    assert_eq!(limit.check(0), Ok(()));
    assert_eq!(limit.check(3), Ok(()));
    assert_eq!(limit.check(4), Err(DepthExceeded { depth: 4, limit: 3 }));
}

#[test]
fn test_depth_exceeded_message() {
    let err = DepthExceeded { depth: 9, limit: 8 };
    assert_eq!(err.to_string(), "recursion depth 9 exceeds limit of 8");
}

#[cfg(not(target_arch = "wasm32"))]
#[test]
fn test_native_default_is_unlimited() {
    assert_eq!(DepthLimit::default(), DepthLimit::UNLIMITED);
}
