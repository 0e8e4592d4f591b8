use std::hint::black_box;

use noexcept_callees::{ExceptionSpec, Sentinel, ThrowGuard};

use super::{CallShape, Scenario, ScenarioKind};

/// Makes `calls` nested calls; every frame but the innermost owns a sentinel.
#[inline(never)]
pub fn recursive_func<S: ExceptionSpec>(calls: u16, guard: ThrowGuard) -> Result<(), S::Error> {
    if calls > 1 {
        let _sentinel = Sentinel::<S>::new(guard)?;
        recursive_func::<S>(calls - 1, guard)?;
    }
    Ok(())
}

/// One `depth`-deep recursion per invocation.
///
/// Very large depths overflow the thread stack; the configuration caps the
/// depth at `u16::MAX`, which is still beyond some platforms' limits.
#[derive(Clone, Debug)]
pub struct RecursiveCalls {
    depth: u16,
    loopsize: usize,
    guard: ThrowGuard,
}

impl RecursiveCalls {
    pub fn new(depth: u16, loopsize: usize, guard: ThrowGuard) -> Self {
        Self {
            depth,
            loopsize,
            guard,
        }
    }
}

impl CallShape for RecursiveCalls {
    fn scenario(&self) -> Scenario {
        Scenario {
            kind: ScenarioKind::Recursive,
            name: "recursive function calls",
            n: u64::from(self.depth),
            loopsize: self.loopsize,
        }
    }

    fn invoke<S: ExceptionSpec>(&mut self) -> Result<(), S::Error> {
        recursive_func::<S>(black_box(self.depth), self.guard)
    }
}
