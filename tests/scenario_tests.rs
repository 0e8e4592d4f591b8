#![recursion_limit = "2048"]

use noexcept_bench::{
    CallShape, MayThrow, NoThrow, ScenarioKind,
    scenarios::{
        ExportedCalls, InlineCalls, RESERVE_SEED, RecursiveCalls, ReserveCalls, Succ,
        UNROLLED_DEPTH, UnrolledCalls, Zero, recursive_func, unrolled::Plus10,
    },
};
use noexcept_callees::{ThrowGuard, exported::live_sentinels};

#[test]
fn test_scenario_metadata() {
    let guard = ThrowGuard::disabled();
    let inline = InlineCalls::new(5, guard).scenario();
    assert_eq!((inline.kind, inline.n, inline.loopsize), (ScenarioKind::Inline, 5, 1));
    let exported = ExportedCalls::new(6, 100, guard).scenario();
    assert_eq!((exported.n, exported.loopsize), (6, 100));
    let recursive = RecursiveCalls::new(7, 100, guard).scenario();
    assert_eq!(recursive.name, "recursive function calls");
    assert_eq!(recursive.n, 7);
    let unrolled: UnrolledCalls = UnrolledCalls::new(100, guard);
    assert_eq!(unrolled.scenario().n, u64::from(UNROLLED_DEPTH));
    let reserve = ReserveCalls::new(9, RESERVE_SEED, guard).scenario();
    assert_eq!((reserve.n, reserve.loopsize), (9, 1));
}

#[test]
fn test_inline_and_exported_calls_succeed_in_both_styles() {
    let guard = ThrowGuard::disabled();
    let mut inline = InlineCalls::new(1_000, guard);
    let Ok(()) = inline.invoke::<NoThrow>();
    inline.invoke::<MayThrow>().expect("inline may-throw");
    let mut exported = ExportedCalls::new(1_000, 1, guard);
    let Ok(()) = exported.invoke::<NoThrow>();
    exported.invoke::<MayThrow>().expect("exported may-throw");
}

#[test]
fn test_recursion_releases_every_sentinel() {
    let guard = ThrowGuard::disabled();
    let mut shape = RecursiveCalls::new(500, 1, guard);
    let Ok(()) = shape.invoke::<NoThrow>();
    shape.invoke::<MayThrow>().expect("recursion");
    assert_eq!(live_sentinels(), 0);
    recursive_func::<MayThrow>(0, guard).expect("zero depth");
    recursive_func::<MayThrow>(1, guard).expect("single call");
    assert_eq!(live_sentinels(), 0);
}

#[test]
fn test_unrolled_recursion_with_custom_depth() {
    let guard = ThrowGuard::disabled();
    let mut shape: UnrolledCalls<Plus10<Succ<Zero>>> = UnrolledCalls::new(1, guard);
    assert_eq!(shape.scenario().n, 11);
    let Ok(()) = shape.invoke::<NoThrow>();
    shape.invoke::<MayThrow>().expect("unrolled");
    assert_eq!(live_sentinels(), 0);
}

#[test]
fn test_reserve_keeps_contents_in_both_styles() {
    let mut shape = ReserveCalls::new(64, RESERVE_SEED, ThrowGuard::disabled());
    let before = shape.buffer().to_vec();
    let Ok(()) = shape.invoke::<NoThrow>();
    shape.invoke::<MayThrow>().expect("reserve");
    assert_eq!(shape.buffer(), before.as_slice());
}

#[test]
fn test_empty_reserve_buffer_is_fine() {
    let mut shape = ReserveCalls::new(0, RESERVE_SEED, ThrowGuard::disabled());
    let Ok(()) = shape.invoke::<NoThrow>();
    shape.invoke::<MayThrow>().expect("reserve");
    assert!(shape.buffer().is_empty());
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "do_throw = false")]
fn test_asserting_guard_trips_in_debug_builds() {
    let mut shape = ExportedCalls::new(1, 1, ThrowGuard::new(true, false));
    let _ = shape.invoke::<MayThrow>();
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "do_throw = false")]
fn test_reserve_honours_asserting_guard_in_debug_builds() {
    let mut shape = ReserveCalls::new(4, RESERVE_SEED, ThrowGuard::new(true, false));
    let _ = shape.invoke::<MayThrow>();
}

#[cfg(not(debug_assertions))]
#[test]
fn test_raising_guard_fails_reserve_before_growing() {
    let mut shape = ReserveCalls::new(4, RESERVE_SEED, ThrowGuard::new(true, true));
    let before = shape.buffer().to_vec();
    let err = shape.invoke::<MayThrow>().unwrap_err();
    assert!(matches!(err, noexcept_bench::CallFault::Injected));
    assert_eq!(shape.buffer(), before.as_slice());
}

#[cfg(not(debug_assertions))]
#[test]
fn test_raising_guard_propagates_fault_out_of_recursion() {
    let mut shape = RecursiveCalls::new(20, 1, ThrowGuard::new(true, true));
    let err = shape.invoke::<MayThrow>().unwrap_err();
    assert!(matches!(err, noexcept_bench::CallFault::Injected));
    assert_eq!(live_sentinels(), 0);
}

#[cfg(not(debug_assertions))]
#[test]
fn test_asserting_guard_is_silent_in_optimized_builds() {
    let mut shape = ExportedCalls::new(3, 1, ThrowGuard::new(true, false));
    shape.invoke::<MayThrow>().expect("assert-only guard");
}
