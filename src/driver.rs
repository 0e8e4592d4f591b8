//! A/B comparison driver.
//!
//! For every outer iteration the driver measures the no-throw instantiation of
//! a call shape, then the may-throw instantiation, and folds the pair into a
//! [`ComparisonAccumulator`]. Nothing is carried from one scenario to the next.

use std::{hint::black_box, io::Write};

use noexcept_callees::{ExceptionSpec, MayThrow, NoThrow};

use crate::{
    BenchError,
    clock::AnyClock,
    compare::{ComparisonAccumulator, Durations, ScenarioReport},
    config::BenchConfig,
    measure::{MeasurementContext, Profiler},
    report,
    scenarios::{
        CallShape, ExportedCalls, InlineCalls, RESERVE_SEED, RecursiveCalls, ReserveCalls,
        ScenarioKind, UnrolledCalls,
        unrolled::{Depth10, Depth42, Depth100, Depth1000},
    },
};

/// Measures one call style of `shape`. A fault reported by any invocation
/// fails the measurement.
pub fn profile_variant<S, P, C>(
    profiler: &mut P,
    shape: &mut C,
    loopsize: usize,
) -> Result<f64, BenchError>
where
    S: ExceptionSpec,
    P: Profiler,
    C: CallShape,
{
    let mut fault: Option<S::Error> = None;
    let duration = profiler.profile(loopsize, || {
        if let Err(err) = black_box(shape.invoke::<S>()) {
            fault.get_or_insert(err);
        }
    });
    match fault {
        Some(err) => Err(BenchError::call_fault(S::NAME, err.to_string())),
        None => Ok(duration),
    }
}

pub fn profile_pair<P, C>(profiler: &mut P, shape: &mut C) -> Result<Durations, BenchError>
where
    P: Profiler,
    C: CallShape,
{
    let loopsize = shape.scenario().loopsize;
    let no_throw = profile_variant::<NoThrow, _, _>(profiler, shape, loopsize)?;
    let may_throw = profile_variant::<MayThrow, _, _>(profiler, shape, loopsize)?;
    Ok(Durations {
        no_throw,
        may_throw,
    })
}

/// Runs `iterations` comparisons of `shape` and prints them to `out`.
pub fn run_scenario<P, C, W>(
    profiler: &mut P,
    shape: &mut C,
    iterations: usize,
    out: &mut W,
) -> Result<ScenarioReport, BenchError>
where
    P: Profiler,
    C: CallShape,
    W: Write,
{
    let scenario = shape.scenario();
    tracing::info!(
        scenario = scenario.kind.as_str(),
        n = scenario.n,
        iterations,
        "scenario started"
    );
    report::write_header(out, &scenario)?;
    let mut accumulator = ComparisonAccumulator::new();
    for iteration in 0..iterations {
        let durations = profile_pair(profiler, shape)?;
        let winner = accumulator.update(durations);
        tracing::debug!(
            scenario = scenario.kind.as_str(),
            iteration,
            no_throw_ns = durations.no_throw,
            may_throw_ns = durations.may_throw,
            ?winner,
            "iteration measured"
        );
        report::write_iteration(out, &durations)?;
    }
    let result = accumulator.finish(&scenario);
    report::write_summary(out, &result)?;
    tracing::info!(
        scenario = scenario.kind.as_str(),
        verdict = ?result.verdict,
        "scenario finished"
    );
    Ok(result)
}

/// Runs every configured scenario in order with the given profiler.
pub fn run_benchmark<P, W>(
    config: &BenchConfig,
    profiler: &mut P,
    out: &mut W,
) -> Result<Vec<ScenarioReport>, BenchError>
where
    P: Profiler,
    W: Write,
{
    config.validate()?;
    report::write_preamble(out, config)?;
    let guard = config.fault_injection.guard();
    let mut reports = Vec::new();
    for kind in ScenarioKind::ALL {
        if !config.includes(kind) {
            continue;
        }
        let result = match kind {
            ScenarioKind::Inline => {
                let mut shape = InlineCalls::new(config.inline_calls, guard);
                run_scenario(profiler, &mut shape, config.iterations, out)?
            }
            ScenarioKind::Exported => {
                let mut shape = ExportedCalls::new(config.exported_calls, config.loopsize, guard);
                run_scenario(profiler, &mut shape, config.iterations, out)?
            }
            ScenarioKind::Recursive => {
                let mut shape = RecursiveCalls::new(config.recursion_depth, config.loopsize, guard);
                run_scenario(profiler, &mut shape, config.iterations, out)?
            }
            ScenarioKind::Unrolled => run_unrolled(config, profiler, out)?,
            ScenarioKind::Reserve => {
                let mut shape = ReserveCalls::new(config.reserve_size, RESERVE_SEED, guard);
                run_scenario(profiler, &mut shape, config.iterations, out)?
            }
        };
        reports.push(result);
    }
    report::write_footer(out)?;
    Ok(reports)
}

/// Dispatches the configured unrolled depth to its compiled instantiation.
fn run_unrolled<P, W>(
    config: &BenchConfig,
    profiler: &mut P,
    out: &mut W,
) -> Result<ScenarioReport, BenchError>
where
    P: Profiler,
    W: Write,
{
    let guard = config.fault_injection.guard();
    match config.unrolled_depth {
        10 => {
            let mut shape = UnrolledCalls::<Depth10>::new(config.loopsize, guard);
            run_scenario(profiler, &mut shape, config.iterations, out)
        }
        42 => {
            let mut shape = UnrolledCalls::<Depth42>::new(config.loopsize, guard);
            run_scenario(profiler, &mut shape, config.iterations, out)
        }
        100 => {
            let mut shape = UnrolledCalls::<Depth100>::new(config.loopsize, guard);
            run_scenario(profiler, &mut shape, config.iterations, out)
        }
        1000 => {
            let mut shape = UnrolledCalls::<Depth1000>::new(config.loopsize, guard);
            run_scenario(profiler, &mut shape, config.iterations, out)
        }
        other => Err(BenchError::invalid_config(format!(
            "unrolled depth {other} is not compiled in"
        ))),
    }
}

/// Builds the measurement context from `config`, runs the benchmark and
/// writes the JSON summary when one was requested.
pub fn run<W: Write>(config: &BenchConfig, out: &mut W) -> Result<Vec<ScenarioReport>, BenchError> {
    let clock = AnyClock::from_kind(config.clock, config.cpu_frequency)?;
    let mut context = MeasurementContext::new(clock, config.minimum_of, config.reduction);
    let reports = run_benchmark(config, &mut context, out)?;
    if let Some(path) = &config.json_path {
        report::write_json(path, config, &reports)?;
        tracing::info!(path = %path.display(), "json summary written");
    }
    Ok(reports)
}
