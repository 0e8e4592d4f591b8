//! Tick sources for the measurement context.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::BenchError;

/// Reference clock rate used to convert time-stamp-counter cycles to time.
pub const CPU_FREQUENCY: f64 = 3_612_059_050.0;

/// A monotonic tick counter with a known rate.
pub trait Clock {
    fn now(&mut self) -> u64;
    fn ticks_per_second(&self) -> f64;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockKind {
    Wall,
    Cycles,
}

impl ClockKind {
    pub fn parse(value: &str) -> Result<Self, BenchError> {
        match value {
            "wall" => Ok(ClockKind::Wall),
            "cycles" => Ok(ClockKind::Cycles),
            other => Err(BenchError::invalid_config(format!(
                "unknown clock {other}, expected wall or cycles"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClockKind::Wall => "wall",
            ClockKind::Cycles => "cycles",
        }
    }
}

/// Nanoseconds since construction, from `Instant`.
#[derive(Clone, Copy, Debug)]
pub struct WallClock {
    origin: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for WallClock {
    #[inline]
    fn now(&mut self) -> u64 {
        u64::try_from(self.origin.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }

    fn ticks_per_second(&self) -> f64 {
        1e9
    }
}

/// Raw time-stamp counter. Only available on x86_64.
#[derive(Clone, Copy, Debug)]
pub struct CycleClock {
    frequency: f64,
}

impl CycleClock {
    pub fn new(frequency: f64) -> Result<Self, BenchError> {
        if !(frequency.is_finite() && frequency > 0.0) {
            return Err(BenchError::invalid_config(format!(
                "cpu frequency must be positive, got {frequency}"
            )));
        }
        if !cfg!(target_arch = "x86_64") {
            return Err(BenchError::unsupported_clock(
                "cycle counter requires an x86_64 target",
            ));
        }
        Ok(Self { frequency })
    }
}

impl Clock for CycleClock {
    #[inline]
    fn now(&mut self) -> u64 {
        #[cfg(target_arch = "x86_64")]
        {
            // SAFETY: rdtsc reads a counter register and touches no memory.
            unsafe { core::arch::x86_64::_rdtsc() }
        }
        #[cfg(not(target_arch = "x86_64"))]
        {
            0
        }
    }

    fn ticks_per_second(&self) -> f64 {
        self.frequency
    }
}

/// Either clock, chosen at run time from the configuration.
#[derive(Clone, Copy, Debug)]
pub enum AnyClock {
    Wall(WallClock),
    Cycles(CycleClock),
}

impl AnyClock {
    pub fn from_kind(kind: ClockKind, cpu_frequency: f64) -> Result<Self, BenchError> {
        match kind {
            ClockKind::Wall => Ok(AnyClock::Wall(WallClock::new())),
            ClockKind::Cycles => CycleClock::new(cpu_frequency).map(AnyClock::Cycles),
        }
    }
}

impl Clock for AnyClock {
    #[inline]
    fn now(&mut self) -> u64 {
        match self {
            AnyClock::Wall(clock) => clock.now(),
            AnyClock::Cycles(clock) => clock.now(),
        }
    }

    fn ticks_per_second(&self) -> f64 {
        match self {
            AnyClock::Wall(clock) => clock.ticks_per_second(),
            AnyClock::Cycles(clock) => clock.ticks_per_second(),
        }
    }
}
