//! Run configuration.
//!
//! Assembled once at start-up and passed down to every scenario. Defaults
//! depend on the build profile: debug builds use small call counts because
//! they exist to check behaviour, not to time it.

use std::{path::PathBuf, str::FromStr};

use noexcept_callees::ThrowGuard;
use serde::{Deserialize, Serialize};

use crate::{
    BenchError,
    clock::{CPU_FREQUENCY, ClockKind},
    measure::{DEFAULT_MINIMUM_OF, DEFAULT_NK, Reduction},
    scenarios::{ScenarioKind, UNROLLED_DEPTH, UNROLLED_DEPTHS},
};

pub const DEFAULT_ITERATIONS: usize = 10;
pub const DEFAULT_LOOPSIZE: usize = 1000;

pub const DEBUG_CALL_COUNT: u64 = 42;

pub const RELEASE_INLINE_CALLS: u64 = 100_000_000;
pub const RELEASE_EXPORTED_CALLS: u64 = 1_000;
pub const RELEASE_RECURSION_DEPTH: u16 = 1_000;
pub const RELEASE_RESERVE_SIZE: usize = 10_000_000;

/// What the guarded throw helper does when the callees are exercised.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaultInjection {
    /// Callees are called with an opaque `false`; nothing ever fails.
    #[default]
    Off,
    /// Callees are asked to fail; debug builds trip the assertion, optimized
    /// builds carry on without raising.
    Assert,
    /// Callees are asked to fail and raise after the assertion.
    Raise,
}

impl FaultInjection {
    pub fn parse(value: &str) -> Result<Self, BenchError> {
        match value {
            "off" => Ok(FaultInjection::Off),
            "assert" => Ok(FaultInjection::Assert),
            "raise" => Ok(FaultInjection::Raise),
            other => Err(BenchError::invalid_config(format!(
                "unknown fault injection mode {other}, expected off, assert or raise"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FaultInjection::Off => "off",
            FaultInjection::Assert => "assert",
            FaultInjection::Raise => "raise",
        }
    }

    pub fn guard(&self) -> ThrowGuard {
        match self {
            FaultInjection::Off => ThrowGuard::disabled(),
            FaultInjection::Assert => ThrowGuard::new(true, false),
            FaultInjection::Raise => ThrowGuard::new(true, true),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Outer iterations per scenario.
    pub iterations: usize,
    /// Invocations per trial for shapes that do not loop internally.
    pub loopsize: usize,
    /// Trials per measurement.
    pub minimum_of: usize,
    pub reduction: Reduction,
    pub clock: ClockKind,
    /// Cycles per second, used only by the cycle clock.
    pub cpu_frequency: f64,
    pub fault_injection: FaultInjection,
    pub inline_calls: u64,
    pub exported_calls: u64,
    pub recursion_depth: u16,
    pub reserve_size: usize,
    /// Depth of the unrolled recursion; one of [`UNROLLED_DEPTHS`].
    pub unrolled_depth: u32,
    /// Scenarios to run; empty means all of them.
    pub only: Vec<ScenarioKind>,
    pub json_path: Option<PathBuf>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Self::with_call_counts(
                DEBUG_CALL_COUNT,
                DEBUG_CALL_COUNT,
                DEBUG_CALL_COUNT as u16,
                DEBUG_CALL_COUNT as usize,
            )
        } else {
            Self::with_call_counts(
                RELEASE_INLINE_CALLS,
                RELEASE_EXPORTED_CALLS,
                RELEASE_RECURSION_DEPTH,
                RELEASE_RESERVE_SIZE,
            )
        }
    }
}

impl BenchConfig {
    fn with_call_counts(
        inline_calls: u64,
        exported_calls: u64,
        recursion_depth: u16,
        reserve_size: usize,
    ) -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            loopsize: DEFAULT_LOOPSIZE,
            minimum_of: DEFAULT_MINIMUM_OF,
            reduction: Reduction::Minimum,
            clock: ClockKind::Wall,
            cpu_frequency: CPU_FREQUENCY,
            fault_injection: FaultInjection::Off,
            inline_calls,
            exported_calls,
            recursion_depth,
            reserve_size,
            unrolled_depth: UNROLLED_DEPTH,
            only: Vec::new(),
            json_path: None,
        }
    }

    /// Parses command-line flags on top of the defaults. `args[0]` is the
    /// program name.
    pub fn from_args(args: &[&str]) -> Result<Self, BenchError> {
        let mut config = Self::default();
        let mut reduction = config.reduction.as_str().to_string();
        let mut nk = DEFAULT_NK;
        let mut iter = args.iter().skip(1);
        while let Some(arg) = iter.next() {
            let mut value = || {
                iter.next()
                    .copied()
                    .ok_or_else(|| BenchError::invalid_config(format!("{arg} requires a value")))
            };
            match *arg {
                "--iterations" => config.iterations = parse_value(arg, value()?)?,
                "--loopsize" => config.loopsize = parse_value(arg, value()?)?,
                "--minimum-of" => config.minimum_of = parse_value(arg, value()?)?,
                "--reduction" => reduction = value()?.to_string(),
                "--nk" => nk = parse_value(arg, value()?)?,
                "--clock" => config.clock = ClockKind::parse(value()?)?,
                "--cpu-frequency" => config.cpu_frequency = parse_value(arg, value()?)?,
                "--fault-injection" => {
                    config.fault_injection = FaultInjection::parse(value()?)?;
                }
                "--inline-calls" => config.inline_calls = parse_value(arg, value()?)?,
                "--exported-calls" => config.exported_calls = parse_value(arg, value()?)?,
                "--recursion-depth" => {
                    let depth: u64 = parse_value(arg, value()?)?;
                    config.recursion_depth = u16::try_from(depth).map_err(|_| {
                        BenchError::invalid_config(format!(
                            "--recursion-depth {depth} exceeds {}",
                            u16::MAX
                        ))
                    })?;
                }
                "--reserve-size" => config.reserve_size = parse_value(arg, value()?)?,
                "--unrolled-depth" => config.unrolled_depth = parse_value(arg, value()?)?,
                "--only" => {
                    let kind = ScenarioKind::parse(value()?)?;
                    if !config.only.contains(&kind) {
                        config.only.push(kind);
                    }
                }
                "--json" => config.json_path = Some(PathBuf::from(value()?)),
                other => {
                    return Err(BenchError::invalid_config(format!("unknown flag {other}")));
                }
            }
        }
        config.reduction = Reduction::parse(&reduction, nk)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), BenchError> {
        if self.loopsize == 0 {
            return Err(BenchError::invalid_config("loopsize must be at least 1"));
        }
        if self.minimum_of == 0 {
            return Err(BenchError::invalid_config("minimum-of must be at least 1"));
        }
        if let Reduction::Frequency { nk: 0 } = self.reduction {
            return Err(BenchError::invalid_config("nk must be at least 1"));
        }
        if !UNROLLED_DEPTHS.contains(&self.unrolled_depth) {
            return Err(BenchError::invalid_config(format!(
                "unrolled depth {} is not one of {:?}",
                self.unrolled_depth, UNROLLED_DEPTHS
            )));
        }
        if !(self.cpu_frequency.is_finite() && self.cpu_frequency > 0.0) {
            return Err(BenchError::invalid_config(format!(
                "cpu frequency must be positive, got {}",
                self.cpu_frequency
            )));
        }
        Ok(())
    }

    pub fn includes(&self, kind: ScenarioKind) -> bool {
        self.only.is_empty() || self.only.contains(&kind)
    }

    pub fn help() -> &'static str {
        "Usage: noexcept_bench [--iterations K] [--loopsize L] [--minimum-of M]\n\
         \x20                     [--reduction min|freq] [--nk NK] [--clock wall|cycles]\n\
         \x20                     [--cpu-frequency HZ] [--fault-injection off|assert|raise]\n\
         \x20                     [--inline-calls N] [--exported-calls N] [--recursion-depth N]\n\
         \x20                     [--reserve-size N] [--unrolled-depth 10|42|100|1000]\n\
         \x20                     [--only inline|exported|recursive|unrolled|reserve]\n\
         \x20                     [--json PATH]\n"
    }
}

fn parse_value<T: FromStr>(flag: &str, value: &str) -> Result<T, BenchError> {
    value
        .parse()
        .map_err(|_| BenchError::invalid_config(format!("invalid value {value} for {flag}")))
}
