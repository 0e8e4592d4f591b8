use std::hint::black_box;

use noexcept_callees::{ExceptionSpec, ThrowGuard};

use super::{CallShape, Scenario, ScenarioKind};

/// `calls` calls into the separately compiled callee crate per invocation.
#[derive(Clone, Debug)]
pub struct ExportedCalls {
    calls: u64,
    loopsize: usize,
    guard: ThrowGuard,
}

impl ExportedCalls {
    pub fn new(calls: u64, loopsize: usize, guard: ThrowGuard) -> Self {
        Self {
            calls,
            loopsize,
            guard,
        }
    }
}

impl CallShape for ExportedCalls {
    fn scenario(&self) -> Scenario {
        Scenario {
            kind: ScenarioKind::Exported,
            name: "exported library function calls",
            n: self.calls,
            loopsize: self.loopsize,
        }
    }

    fn invoke<S: ExceptionSpec>(&mut self) -> Result<(), S::Error> {
        for _ in 0..black_box(self.calls) {
            S::exported_func(self.guard)?;
        }
        Ok(())
    }
}
