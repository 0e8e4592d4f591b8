#![recursion_limit = "2048"]

use std::collections::VecDeque;

use noexcept_bench::{
    MeasurementContext, Profiler, Reduction,
    clock::{Clock, WallClock},
};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Replays trial durations as (start, end) timestamp pairs.
struct ScriptedClock {
    stamps: VecDeque<u64>,
    rate: f64,
}

impl ScriptedClock {
    fn from_trials(trials: &[u64], rate: f64) -> Self {
        let mut stamps = VecDeque::new();
        let mut now = 1_000u64;
        for &ticks in trials {
            stamps.push_back(now);
            now += ticks;
            stamps.push_back(now);
            now += 17;
        }
        Self { stamps, rate }
    }
}

impl Clock for ScriptedClock {
    fn now(&mut self) -> u64 {
        self.stamps.pop_front().expect("clock script exhausted")
    }

    fn ticks_per_second(&self) -> f64 {
        self.rate
    }
}

#[test]
fn test_minimum_is_never_above_any_trial() {
    let mut rng = StdRng::seed_from_u64(0x0DD5);
    for case in 0..200 {
        let minimum_of = rng.gen_range(1..=8);
        let loopsize = rng.gen_range(1..=2_000);
        let trials: Vec<u64> = (0..minimum_of)
            .map(|_| rng.gen_range(0..1_000_000))
            .collect();
        let clock = ScriptedClock::from_trials(&trials, 1e9);
        let mut context = MeasurementContext::new(clock, minimum_of, Reduction::Minimum);
        let measurement = context.measure(loopsize, || {});
        assert_eq!(measurement.trial_ns.len(), minimum_of, "case {case}");
        for trial in &measurement.trial_ns {
            assert!(measurement.per_call_ns <= *trial, "case {case}");
        }
    }
}

#[test]
fn test_reported_duration_is_per_invocation() {
    let clock = ScriptedClock::from_trials(&[5_000, 3_000, 4_000], 1e9);
    let mut context = MeasurementContext::new(clock, 3, Reduction::Minimum);
    let measurement = context.measure(1_000, || {});
    assert_eq!(measurement.per_call_ns, 3.0);
    assert_eq!(measurement.trial_ns, vec![5.0, 3.0, 4.0]);
}

#[test]
fn test_cycle_ticks_convert_through_clock_rate() {
    let clock = ScriptedClock::from_trials(&[2_000], 2e9);
    let mut context = MeasurementContext::new(clock, 1, Reduction::Minimum);
    assert_eq!(context.profile(1, || {}), 1_000.0);
}

#[test]
fn test_operation_runs_loopsize_times_per_trial() {
    let clock = ScriptedClock::from_trials(&[10, 10, 10], 1e9);
    let mut context = MeasurementContext::new(clock, 3, Reduction::Minimum);
    let mut calls = 0usize;
    context.measure(25, || calls += 1);
    assert_eq!(calls, 75);
}

#[test]
fn test_zero_loopsize_and_trials_are_clamped() {
    let clock = ScriptedClock::from_trials(&[40], 1e9);
    let mut context = MeasurementContext::new(clock, 0, Reduction::Minimum);
    assert_eq!(context.minimum_of(), 1);
    let mut calls = 0usize;
    let measurement = context.measure(0, || calls += 1);
    assert_eq!(calls, 1);
    assert_eq!(measurement.per_call_ns, 40.0);
}

#[test]
fn test_frequency_reduction_skips_outlier_trial() {
    let clock = ScriptedClock::from_trials(&[1_000, 9_000, 1_000, 1_000, 1_004], 1e9);
    let mut context = MeasurementContext::new(clock, 5, Reduction::Frequency { nk: 1 });
    let measurement = context.measure(1, || {});
    assert_eq!(measurement.per_call_ns, 1_001.0);
}

#[test]
fn test_wall_clock_noop_measurement_is_non_negative() {
    let mut context = MeasurementContext::new(WallClock::new(), 3, Reduction::Minimum);
    let measurement = context.measure(1_000, || {});
    assert!(measurement.per_call_ns >= 0.0);
    assert!(measurement.per_call_ns.is_finite());
}

#[test]
fn test_frequency_reduction_with_distinct_trials_keeps_fastest() {
    let clock = ScriptedClock::from_trials(&[100, 500, 900], 1e9);
    let mut context = MeasurementContext::new(clock, 3, Reduction::Frequency { nk: 3 });
    let measurement = context.measure(1, || {});
    assert_eq!(measurement.trial_ns, vec![100.0, 500.0, 900.0]);
    assert_eq!(measurement.per_call_ns, 100.0);
}
