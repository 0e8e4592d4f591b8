//! Human-readable console report and the optional JSON summary.

use std::{fs, io::Write, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    BenchError,
    compare::{Durations, ScenarioReport},
    config::BenchConfig,
    scenarios::Scenario,
};

const PRECISION: usize = 4;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BenchSummary {
    pub version: String,
    pub optimized: bool,
    pub config: BenchConfig,
    pub reports: Vec<ScenarioReport>,
}

pub fn write_preamble<W: Write>(out: &mut W, config: &BenchConfig) -> Result<(), BenchError> {
    let pointer_bits = usize::BITS;
    let profile = if cfg!(debug_assertions) {
        "debug (debug assertions enabled)"
    } else {
        "optimized"
    };
    let only = if config.only.is_empty() {
        "all".to_string()
    } else {
        config
            .only
            .iter()
            .map(|kind| kind.as_str())
            .collect::<Vec<_>>()
            .join(",")
    };
    writeln!(
        out,
        "noexcept-bench {}: explicit no-throw versus possibly failing calls\n\
         pointer width = {} bytes ({pointer_bits}-bit)\n\
         build = {profile}\n\
         iterations = {}\n\
         loopsize = {}, minimum_of = {}, reduction = {}\n\
         clock = {}\n\
         fault injection = {}\n\
         unrolled depth = {}\n\
         scenarios = {only}",
        env!("CARGO_PKG_VERSION"),
        std::mem::size_of::<usize>(),
        config.iterations,
        config.loopsize,
        config.minimum_of,
        config.reduction.as_str(),
        config.clock.as_str(),
        config.fault_injection.as_str(),
        config.unrolled_depth,
    )
    .map_err(io_error)
}

pub fn write_header<W: Write>(out: &mut W, scenario: &Scenario) -> Result<(), BenchError> {
    write!(
        out,
        "\n[{} (N = {})]\n  no-throw \t may-throw",
        scenario.name, scenario.n
    )
    .and_then(|()| out.flush())
    .map_err(io_error)
}

pub fn write_iteration<W: Write>(out: &mut W, durations: &Durations) -> Result<(), BenchError> {
    write!(
        out,
        "\n  {:.p$} \t {:.p$}",
        durations.no_throw,
        durations.may_throw,
        p = PRECISION
    )
    .and_then(|()| out.flush())
    .map_err(io_error)
}

pub fn write_summary<W: Write>(out: &mut W, report: &ScenarioReport) -> Result<(), BenchError> {
    writeln!(
        out,
        "\nShortest duration: {} ns (explicit no-throw)\
         \nShortest duration: {} ns (possibly failing)\
         \nSum of durations: {:.p$} ns (explicit no-throw)\
         \nSum of durations: {:.p$} ns (possibly failing)\
         \nRatio sum of durations no-throw/may-throw: {:.p$}\
         \nRatio sum of durations may-throw/no-throw: {:.p$}\
         \n{}",
        format_shortest(report.shortest_no_throw_ns),
        format_shortest(report.shortest_may_throw_ns),
        report.sum_no_throw_ns,
        report.sum_may_throw_ns,
        report.ratio_no_throw_to_may_throw,
        report.ratio_may_throw_to_no_throw,
        report.verdict.sentence(),
        p = PRECISION
    )
    .map_err(io_error)
}

pub fn write_footer<W: Write>(out: &mut W) -> Result<(), BenchError> {
    writeln!(out, "{}", "=".repeat(80)).map_err(io_error)
}

pub fn write_json(
    path: &Path,
    config: &BenchConfig,
    reports: &[ScenarioReport],
) -> Result<(), BenchError> {
    let summary = BenchSummary {
        version: env!("CARGO_PKG_VERSION").to_string(),
        optimized: !cfg!(debug_assertions),
        config: config.clone(),
        reports: reports.to_vec(),
    };
    let data = serde_json::to_vec_pretty(&summary).map_err(json_error)?;
    fs::write(path, data).map_err(|e| BenchError::io(format!("{}: {e}", path.display())))
}

fn format_shortest(value: Option<f64>) -> String {
    match value {
        Some(ns) => format!("{ns:.p$}", p = PRECISION),
        None => "n/a".to_string(),
    }
}

fn json_error(err: serde_json::Error) -> BenchError {
    BenchError::io(format!("json summary: {err}"))
}

fn io_error(err: std::io::Error) -> BenchError {
    BenchError::io(err.to_string())
}
