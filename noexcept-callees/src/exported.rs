//! Out-of-line entry points. None of these are generic, so callers in other
//! crates cannot inline them.

use std::{cell::Cell, hint::black_box};

use crate::{CallFault, MayThrow, NoThrow, throw_exception_if};
use crate::spec::ThrowGuard;

thread_local! {
    static LIVE_SENTINELS: Cell<usize> = const { Cell::new(0) };
}

#[inline(never)]
pub fn exported_func_no_throw(guard: ThrowGuard) {
    let Ok(()) = throw_exception_if::<NoThrow>(black_box(guard));
}

#[inline(never)]
pub fn exported_func_may_throw(guard: ThrowGuard) -> Result<(), CallFault> {
    throw_exception_if::<MayThrow>(black_box(guard))
}

#[inline(never)]
pub fn sentinel_enter_no_throw(guard: ThrowGuard) {
    let Ok(()) = throw_exception_if::<NoThrow>(guard);
    LIVE_SENTINELS.with(|live| live.set(live.get() + 1));
}

#[inline(never)]
pub fn sentinel_enter_may_throw(guard: ThrowGuard) -> Result<(), CallFault> {
    throw_exception_if::<MayThrow>(guard)?;
    LIVE_SENTINELS.with(|live| live.set(live.get() + 1));
    Ok(())
}

#[inline(never)]
pub fn sentinel_exit() {
    LIVE_SENTINELS.with(|live| live.set(live.get().saturating_sub(1)));
}

/// Number of sentinels currently alive on this thread.
pub fn live_sentinels() -> usize {
    LIVE_SENTINELS.with(Cell::get)
}
