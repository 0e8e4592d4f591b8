//! Repeated-measurement reducer.
//!
//! A measurement runs the candidate operation `loopsize` times per trial,
//! repeats that for `minimum_of` trials and reduces the trial totals to a
//! single low-noise estimate. Noise only ever makes a trial slower, so the
//! default reduction keeps the fastest trial.

use std::{
    collections::BTreeMap,
    hint::black_box,
    sync::atomic::{Ordering, compiler_fence},
};

use serde::{Deserialize, Serialize};

use crate::{BenchError, clock::Clock};

pub const DEFAULT_MINIMUM_OF: usize = 3;
pub const DEFAULT_NK: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Reduction {
    /// Fastest trial.
    Minimum,
    /// Sample-weighted mean of the `nk` most populated buckets of trial totals.
    /// Falls back to the fastest trial when no bucket holds more than one
    /// sample.
    Frequency { nk: usize },
}

impl Reduction {
    pub fn parse(value: &str, nk: usize) -> Result<Self, BenchError> {
        match value {
            "min" | "minimum" => Ok(Reduction::Minimum),
            "freq" | "frequency" => Ok(Reduction::Frequency { nk }),
            other => Err(BenchError::invalid_config(format!(
                "unknown reduction {other}, expected min or freq"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Reduction::Minimum => "min",
            Reduction::Frequency { .. } => "freq",
        }
    }

    /// Reduces raw trial totals (in clock ticks). Returns 0 for no samples.
    pub fn reduce(&self, samples: &[u64]) -> f64 {
        match *self {
            Reduction::Minimum => samples.iter().copied().min().unwrap_or(0) as f64,
            Reduction::Frequency { nk } => reduce_frequency(samples, nk),
        }
    }
}

fn reduce_frequency(samples: &[u64], nk: usize) -> f64 {
    let Some(fastest) = samples.iter().copied().min() else {
        return 0.0;
    };
    let width = (fastest / 100).max(1);
    let mut buckets: BTreeMap<u64, (usize, u128)> = BTreeMap::new();
    for &sample in samples {
        let bucket = buckets.entry(sample / width).or_insert((0, 0));
        bucket.0 += 1;
        bucket.1 += u128::from(sample);
    }
    let mut ranked: Vec<(u64, usize, u128)> = buckets
        .into_iter()
        .map(|(key, (count, sum))| (key, count, sum))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    if ranked.first().is_none_or(|bucket| bucket.1 < 2) {
        return fastest as f64;
    }
    let (count, sum) = ranked
        .iter()
        .take(nk.max(1))
        .fold((0usize, 0u128), |(count, sum), bucket| {
            (count + bucket.1, sum + bucket.2)
        });
    sum as f64 / count as f64
}

/// Result of one reduced measurement, in nanoseconds per invocation.
#[derive(Clone, Debug, PartialEq)]
pub struct Measurement {
    pub per_call_ns: f64,
    pub trial_ns: Vec<f64>,
}

/// Reduces a candidate operation to a per-invocation duration.
pub trait Profiler {
    fn profile<F: FnMut()>(&mut self, loopsize: usize, op: F) -> f64;
}

/// Owns the clock and the reduction settings for one benchmark run.
#[derive(Clone, Debug)]
pub struct MeasurementContext<C> {
    clock: C,
    minimum_of: usize,
    reduction: Reduction,
}

impl<C: Clock> MeasurementContext<C> {
    pub fn new(clock: C, minimum_of: usize, reduction: Reduction) -> Self {
        Self {
            clock,
            minimum_of: minimum_of.max(1),
            reduction,
        }
    }

    pub fn minimum_of(&self) -> usize {
        self.minimum_of
    }

    pub fn measure<F: FnMut()>(&mut self, loopsize: usize, mut op: F) -> Measurement {
        let loopsize = loopsize.max(1);
        let mut samples = Vec::with_capacity(self.minimum_of);
        for _ in 0..self.minimum_of {
            let start = self.clock.now();
            for _ in 0..loopsize {
                compiler_fence(Ordering::SeqCst);
                op();
                compiler_fence(Ordering::SeqCst);
            }
            let end = self.clock.now();
            samples.push(black_box(end.saturating_sub(start)));
        }
        let rate = self.clock.ticks_per_second();
        let per_call_ns = ticks_to_ns(self.reduction.reduce(&samples), rate, loopsize);
        let trial_ns = samples
            .iter()
            .map(|&ticks| ticks_to_ns(ticks as f64, rate, loopsize))
            .collect();
        tracing::debug!(
            loopsize,
            trials = self.minimum_of,
            reduction = self.reduction.as_str(),
            per_call_ns,
            "measurement reduced"
        );
        Measurement {
            per_call_ns,
            trial_ns,
        }
    }
}

impl<C: Clock> Profiler for MeasurementContext<C> {
    fn profile<F: FnMut()>(&mut self, loopsize: usize, op: F) -> f64 {
        self.measure(loopsize, op).per_call_ns
    }
}

fn ticks_to_ns(ticks: f64, ticks_per_second: f64, loopsize: usize) -> f64 {
    ticks * (1e9 / ticks_per_second) / loopsize as f64
}
