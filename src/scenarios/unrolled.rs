//! Recursion whose depth is fixed at compile time. Depths are type-level
//! naturals, so every level is its own monomorphized function.

use std::marker::PhantomData;

use noexcept_callees::{ExceptionSpec, Sentinel, ThrowGuard};

use super::{CallShape, Scenario, ScenarioKind};

pub trait Unrolled {
    const DEPTH: u32;

    fn descend<S: ExceptionSpec>(guard: ThrowGuard) -> Result<(), S::Error>;
}

pub struct Zero;

pub struct Succ<N>(PhantomData<N>);

impl Unrolled for Zero {
    const DEPTH: u32 = 0;

    #[inline]
    fn descend<S: ExceptionSpec>(_guard: ThrowGuard) -> Result<(), S::Error> {
        Ok(())
    }
}

impl<N: Unrolled> Unrolled for Succ<N> {
    const DEPTH: u32 = N::DEPTH + 1;

    fn descend<S: ExceptionSpec>(guard: ThrowGuard) -> Result<(), S::Error> {
        let _sentinel = Sentinel::<S>::new(guard)?;
        N::descend::<S>(guard)
    }
}

pub type Plus10<N> = Succ<Succ<Succ<Succ<Succ<Succ<Succ<Succ<Succ<Succ<N>>>>>>>>>>;

pub type Plus100<N> =
    Plus10<Plus10<Plus10<Plus10<Plus10<Plus10<Plus10<Plus10<Plus10<Plus10<N>>>>>>>>>>;

pub type Plus1000<N> =
    Plus100<Plus100<Plus100<Plus100<Plus100<Plus100<Plus100<Plus100<Plus100<Plus100<N>>>>>>>>>>;

pub type Depth10 = Plus10<Zero>;
pub type Depth42 = Plus10<Plus10<Plus10<Plus10<Succ<Succ<Zero>>>>>>;
pub type Depth100 = Plus100<Zero>;
pub type Depth1000 = Plus1000<Zero>;

/// Depths compiled into the binary; the configuration picks one at run time.
pub const UNROLLED_DEPTHS: [u32; 4] = [
    <Depth10 as Unrolled>::DEPTH,
    <Depth42 as Unrolled>::DEPTH,
    <Depth100 as Unrolled>::DEPTH,
    <Depth1000 as Unrolled>::DEPTH,
];

#[cfg(debug_assertions)]
pub type UnrolledDepth = Depth42;

#[cfg(not(debug_assertions))]
pub type UnrolledDepth = Depth100;

pub const UNROLLED_DEPTH: u32 = <UnrolledDepth as Unrolled>::DEPTH;

/// One compile-time-unrolled recursion of depth `D::DEPTH` per invocation.
pub struct UnrolledCalls<D = UnrolledDepth> {
    loopsize: usize,
    guard: ThrowGuard,
    _depth: PhantomData<D>,
}

impl<D: Unrolled> UnrolledCalls<D> {
    pub fn new(loopsize: usize, guard: ThrowGuard) -> Self {
        Self {
            loopsize,
            guard,
            _depth: PhantomData,
        }
    }
}

impl<D: Unrolled> CallShape for UnrolledCalls<D> {
    fn scenario(&self) -> Scenario {
        Scenario {
            kind: ScenarioKind::Unrolled,
            name: "unrolled recursion",
            n: u64::from(D::DEPTH),
            loopsize: self.loopsize,
        }
    }

    fn invoke<S: ExceptionSpec>(&mut self) -> Result<(), S::Error> {
        D::descend::<S>(self.guard)
    }
}
