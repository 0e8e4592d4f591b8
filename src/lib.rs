//! Micro-benchmark comparing explicit no-throw calls with possibly failing
//! calls across inline, exported, recursive, unrolled and reservation shapes.
//! Run `cargo run --release` for timings; the criterion bench lives under
//! `benches/`.

#![recursion_limit = "2048"]

pub mod clock;
pub mod compare;
pub mod config;
pub mod driver;
pub mod errors;
pub mod logging;
pub mod measure;
pub mod report;
pub mod scenarios;

pub use crate::compare::{
    ComparisonAccumulator, Durations, ScenarioReport, Verdict, Winner, divide_by_positive,
};
pub use crate::config::{BenchConfig, FaultInjection};
pub use crate::driver::{profile_pair, run, run_benchmark, run_scenario};
pub use crate::errors::BenchError;
pub use crate::measure::{Measurement, MeasurementContext, Profiler, Reduction};
pub use crate::scenarios::{CallShape, Scenario, ScenarioKind};
pub use noexcept_callees::{CallFault, ExceptionSpec, MayThrow, NoThrow, ThrowGuard};
