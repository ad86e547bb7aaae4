use super::*;

#[test]
fn test_enter_leave_tracks_depth() {
    let mut guard = RecursionGuard::<u32>::with_profile(RecursionProfile::Import);
    assert_eq!(guard.enter(1), RecursionResult::Entered);
    assert_eq!(guard.enter(2), RecursionResult::Entered);
    assert_eq!(guard.depth(), 2);

    guard.leave(2);
    guard.leave(1);
    assert_eq!(guard.depth(), 0);
    assert_eq!(guard.enter(1), RecursionResult::Entered);
    guard.leave(1);
}

#[test]
fn test_reentering_a_visiting_key_is_a_cycle() {
    let mut guard = RecursionGuard::<u32>::with_profile(RecursionProfile::Import);
    assert_eq!(guard.enter(7), RecursionResult::Entered);
    assert_eq!(guard.enter(7), RecursionResult::Cycle);
    assert_eq!(guard.depth(), 1);
    guard.leave(7);
}

#[test]
fn test_depth_limit() {
    let mut guard = RecursionGuard::<u32>::with_profile(RecursionProfile::Custom {
        max_depth: 2,
        max_iterations: 100,
    });
    assert_eq!(guard.enter(1), RecursionResult::Entered);
    assert_eq!(guard.enter(2), RecursionResult::Entered);
    assert_eq!(guard.enter(3), RecursionResult::DepthExceeded);
    assert_eq!(guard.depth(), 2);
    guard.leave(2);
    guard.leave(1);
}

#[test]
fn test_iteration_budget() {
    let mut guard = RecursionGuard::<u32>::new(10, 3);
    for key in 0..3 {
        assert_eq!(guard.enter(key), RecursionResult::Entered);
        guard.leave(key);
    }
    assert_eq!(guard.enter(3), RecursionResult::IterationExceeded);
    assert_eq!(guard.depth(), 0);
}

#[test]
fn test_profiles() {
    assert_eq!(RecursionProfile::Import.max_depth(), 500);
    assert_eq!(RecursionProfile::Export.max_iterations(), 100_000);
    assert_eq!(RecursionProfile::Lowering.max_depth(), 500);
    let custom = RecursionProfile::Custom {
        max_depth: 3,
        max_iterations: 9,
    };
    assert_eq!(custom.max_depth(), 3);
    assert_eq!(custom.max_iterations(), 9);
}

#[test]
fn test_depth_counter() {
    let mut counter = DepthCounter::new(2);
    assert!(counter.enter());
    assert!(counter.enter());
    assert!(!counter.enter());
    assert_eq!(counter.depth(), 2);
    counter.leave();
    counter.leave();
    assert_eq!(counter.depth(), 0);
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "active entries")]
fn test_leaked_entry_panics_on_drop() {
    let mut guard = RecursionGuard::<u32>::new(10, 10);
    let _ = guard.enter(1);
    drop(guard);
}
