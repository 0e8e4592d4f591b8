//! The five call shapes. Each is written once, generically over
//! [`ExceptionSpec`], and the driver instantiates it for both call styles.

pub mod exported;
pub mod inline;
pub mod recursive;
pub mod reserve;
pub mod unrolled;

use serde::{Deserialize, Serialize};

use noexcept_callees::ExceptionSpec;

use crate::BenchError;

pub use self::exported::ExportedCalls;
pub use self::inline::InlineCalls;
pub use self::recursive::{RecursiveCalls, recursive_func};
pub use self::reserve::{RESERVE_SEED, ReserveCalls};
pub use self::unrolled::{
    Succ, UNROLLED_DEPTH, UNROLLED_DEPTHS, Unrolled, UnrolledCalls, UnrolledDepth, Zero,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioKind {
    Inline,
    Exported,
    Recursive,
    Unrolled,
    Reserve,
}

impl ScenarioKind {
    pub const ALL: [ScenarioKind; 5] = [
        ScenarioKind::Inline,
        ScenarioKind::Exported,
        ScenarioKind::Recursive,
        ScenarioKind::Unrolled,
        ScenarioKind::Reserve,
    ];

    pub fn parse(value: &str) -> Result<Self, BenchError> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| BenchError::invalid_config(format!("unknown scenario {value}")))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioKind::Inline => "inline",
            ScenarioKind::Exported => "exported",
            ScenarioKind::Recursive => "recursive",
            ScenarioKind::Unrolled => "unrolled",
            ScenarioKind::Reserve => "reserve",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scenario {
    pub kind: ScenarioKind,
    pub name: &'static str,
    /// Call count, recursion depth or element count, depending on the shape.
    pub n: u64,
    /// Invocations per measured trial.
    pub loopsize: usize,
}

/// A benchmark scenario whose single operation can run in either call style.
pub trait CallShape {
    fn scenario(&self) -> Scenario;

    fn invoke<S: ExceptionSpec>(&mut self) -> Result<(), S::Error>;
}
