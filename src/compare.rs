use serde::{Deserialize, Serialize};

use crate::scenarios::Scenario;

/// Returns `x / y`, substituting the smallest positive normal `f64` for a
/// non-positive `y`. A quotient that overflows saturates to `f64::MAX`.
pub fn divide_by_positive(x: f64, y: f64) -> f64 {
    let denominator = if y > 0.0 { y } else { f64::MIN_POSITIVE };
    let ratio = x / denominator;
    if ratio.is_infinite() {
        f64::MAX.copysign(ratio)
    } else {
        ratio
    }
}

/// Reduced per-invocation durations of both variants for one outer iteration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Durations {
    pub no_throw: f64,
    pub may_throw: f64,
}

impl Durations {
    pub fn winner(&self) -> Winner {
        if self.no_throw < self.may_throw {
            Winner::NoThrow
        } else if self.may_throw < self.no_throw {
            Winner::MayThrow
        } else {
            Winner::Tie
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Winner {
    NoThrow,
    MayThrow,
    Tie,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    NoThrowAlwaysFaster,
    MayThrowAlwaysFaster,
    NoConsistentWinner,
}

impl Verdict {
    pub fn sentence(&self) -> &'static str {
        match self {
            Verdict::NoThrowAlwaysFaster => {
                "In this case, explicit no-throw calls always appear faster."
            }
            Verdict::MayThrowAlwaysFaster => {
                "In this case, possibly failing calls always appear faster."
            }
            Verdict::NoConsistentWinner => {
                "In this case, neither no-throw nor possibly failing calls always appear faster."
            }
        }
    }
}

/// Running totals for one scenario.
#[derive(Clone, Debug, PartialEq)]
pub struct ComparisonAccumulator {
    iterations: usize,
    no_throw_wins: usize,
    may_throw_wins: usize,
    ties: usize,
    sum_no_throw: f64,
    sum_may_throw: f64,
    shortest_no_throw: f64,
    shortest_may_throw: f64,
}

impl Default for ComparisonAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl ComparisonAccumulator {
    pub fn new() -> Self {
        Self {
            iterations: 0,
            no_throw_wins: 0,
            may_throw_wins: 0,
            ties: 0,
            sum_no_throw: 0.0,
            sum_may_throw: 0.0,
            shortest_no_throw: f64::INFINITY,
            shortest_may_throw: f64::INFINITY,
        }
    }

    pub fn update(&mut self, durations: Durations) -> Winner {
        self.iterations += 1;
        self.sum_no_throw += durations.no_throw;
        self.sum_may_throw += durations.may_throw;
        self.shortest_no_throw = self.shortest_no_throw.min(durations.no_throw);
        self.shortest_may_throw = self.shortest_may_throw.min(durations.may_throw);
        let winner = durations.winner();
        match winner {
            Winner::NoThrow => self.no_throw_wins += 1,
            Winner::MayThrow => self.may_throw_wins += 1,
            Winner::Tie => self.ties += 1,
        }
        winner
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn no_throw_wins(&self) -> usize {
        self.no_throw_wins
    }

    pub fn may_throw_wins(&self) -> usize {
        self.may_throw_wins
    }

    pub fn ties(&self) -> usize {
        self.ties
    }

    pub fn verdict(&self) -> Verdict {
        if self.iterations > 0 && self.no_throw_wins == self.iterations {
            Verdict::NoThrowAlwaysFaster
        } else if self.iterations > 0 && self.may_throw_wins == self.iterations {
            Verdict::MayThrowAlwaysFaster
        } else {
            Verdict::NoConsistentWinner
        }
    }

    pub fn finish(self, scenario: &Scenario) -> ScenarioReport {
        let verdict = self.verdict();
        ScenarioReport {
            name: scenario.name.to_string(),
            n: scenario.n,
            loopsize: scenario.loopsize,
            iterations: self.iterations,
            no_throw_wins: self.no_throw_wins,
            may_throw_wins: self.may_throw_wins,
            ties: self.ties,
            sum_no_throw_ns: self.sum_no_throw,
            sum_may_throw_ns: self.sum_may_throw,
            shortest_no_throw_ns: finite_or_none(self.shortest_no_throw),
            shortest_may_throw_ns: finite_or_none(self.shortest_may_throw),
            ratio_no_throw_to_may_throw: divide_by_positive(self.sum_no_throw, self.sum_may_throw),
            ratio_may_throw_to_no_throw: divide_by_positive(self.sum_may_throw, self.sum_no_throw),
            verdict,
        }
    }
}

fn finite_or_none(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// Final statistics of one scenario.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub name: String,
    pub n: u64,
    pub loopsize: usize,
    pub iterations: usize,
    pub no_throw_wins: usize,
    pub may_throw_wins: usize,
    pub ties: usize,
    pub sum_no_throw_ns: f64,
    pub sum_may_throw_ns: f64,
    pub shortest_no_throw_ns: Option<f64>,
    pub shortest_may_throw_ns: Option<f64>,
    pub ratio_no_throw_to_may_throw: f64,
    pub ratio_may_throw_to_no_throw: f64,
    pub verdict: Verdict,
}
