use std::hint::black_box;

use noexcept_callees::{ExceptionSpec, ThrowGuard, throw_exception_if};

use super::{CallShape, Scenario, ScenarioKind};

#[inline(always)]
fn inline_func<S: ExceptionSpec>(guard: ThrowGuard) -> Result<(), S::Error> {
    throw_exception_if::<S>(guard)
}

/// `calls` consecutive calls to an always-inlined callee per invocation.
#[derive(Clone, Debug)]
pub struct InlineCalls {
    calls: u64,
    guard: ThrowGuard,
}

impl InlineCalls {
    pub fn new(calls: u64, guard: ThrowGuard) -> Self {
        Self { calls, guard }
    }
}

impl CallShape for InlineCalls {
    fn scenario(&self) -> Scenario {
        Scenario {
            kind: ScenarioKind::Inline,
            name: "inline function calls",
            n: self.calls,
            loopsize: 1,
        }
    }

    fn invoke<S: ExceptionSpec>(&mut self) -> Result<(), S::Error> {
        let guard = black_box(self.guard);
        for _ in 0..black_box(self.calls) {
            inline_func::<S>(guard)?;
        }
        Ok(())
    }
}
