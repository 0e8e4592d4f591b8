use noexcept_callees::{ExceptionSpec, ThrowGuard, throw_exception_if};
use rand::{Rng, SeedableRng, distributions::Alphanumeric, rngs::StdRng};

use super::{CallShape, Scenario, ScenarioKind};

pub const RESERVE_SEED: u64 = 0x5EED_0E5E;

/// Forces a `Vec<String>` of `size` elements to relocate, then shrinks it back.
///
/// The no-throw style grows with `Vec::reserve`, the may-throw style with
/// `Vec::try_reserve`. Both consult the fault guard before growing.
#[derive(Clone, Debug)]
pub struct ReserveCalls {
    buffer: Vec<String>,
    guard: ThrowGuard,
}

impl ReserveCalls {
    pub fn new(size: usize, seed: u64, guard: ThrowGuard) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut buffer = Vec::with_capacity(size);
        for _ in 0..size {
            let len = rng.gen_range(4..=24);
            let value: String = (&mut rng)
                .sample_iter(Alphanumeric)
                .take(len)
                .map(char::from)
                .collect();
            buffer.push(value);
        }
        buffer.shrink_to_fit();
        Self { buffer, guard }
    }

    pub fn buffer(&self) -> &[String] {
        &self.buffer
    }
}

impl CallShape for ReserveCalls {
    fn scenario(&self) -> Scenario {
        Scenario {
            kind: ScenarioKind::Reserve,
            name: "Vec<String> reserve",
            n: self.buffer.len() as u64,
            loopsize: 1,
        }
    }

    fn invoke<S: ExceptionSpec>(&mut self) -> Result<(), S::Error> {
        throw_exception_if::<S>(self.guard)?;
        let additional = self.buffer.capacity() - self.buffer.len() + 1;
        S::reserve(&mut self.buffer, additional)?;
        self.buffer.shrink_to_fit();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_builds_same_buffer() {
        let a = ReserveCalls::new(32, RESERVE_SEED, ThrowGuard::disabled());
        let b = ReserveCalls::new(32, RESERVE_SEED, ThrowGuard::disabled());
        assert_eq!(a.buffer(), b.buffer());
        assert!(a.buffer().iter().all(|s| (4..=24).contains(&s.len())));
    }
}
