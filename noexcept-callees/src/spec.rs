use std::{
    convert::Infallible,
    fmt,
    time::{SystemTime, UNIX_EPOCH},
};

use crate::{CallFault, exported};

/// Decides whether [`throw_exception_if`] is asked to fail and, if so, whether
/// it actually raises after the debug assertion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ThrowGuard {
    pub do_throw: bool,
    pub raise: bool,
}

impl ThrowGuard {
    pub fn new(do_throw: bool, raise: bool) -> Self {
        Self { do_throw, raise }
    }

    /// The guard used for real measurements: `do_throw` is an opaque `false`.
    pub fn disabled() -> Self {
        Self {
            do_throw: get_false(),
            raise: false,
        }
    }
}

/// One of the two call styles under comparison.
///
/// Every callee is written once, generically over `S: ExceptionSpec`, and
/// instantiated with [`NoThrow`] and [`MayThrow`].
pub trait ExceptionSpec: Copy + Default + fmt::Debug + 'static {
    type Error: std::error::Error + Send + Sync + 'static;

    const NAME: &'static str;
    const MAY_THROW: bool;

    /// Raises a fault. For [`NoThrow`] this terminates the process.
    fn raise() -> Result<(), Self::Error>;

    /// Calls the out-of-line exported callee for this style.
    fn exported_func(guard: ThrowGuard) -> Result<(), Self::Error>;

    fn sentinel_enter(guard: ThrowGuard) -> Result<(), Self::Error>;

    fn sentinel_exit();

    /// Grows `buffer` by at least `additional` elements.
    fn reserve<T>(buffer: &mut Vec<T>, additional: usize) -> Result<(), Self::Error>;
}

/// Explicit "never fails" style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoThrow;

/// Implicit, possibly failing style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MayThrow;

impl ExceptionSpec for NoThrow {
    type Error = Infallible;

    const NAME: &'static str = "no-throw";
    const MAY_THROW: bool = false;

    fn raise() -> Result<(), Infallible> {
        tracing::error!("fault raised inside a no-throw callee, aborting");
        std::process::abort()
    }

    #[inline]
    fn exported_func(guard: ThrowGuard) -> Result<(), Infallible> {
        exported::exported_func_no_throw(guard);
        Ok(())
    }

    #[inline]
    fn sentinel_enter(guard: ThrowGuard) -> Result<(), Infallible> {
        exported::sentinel_enter_no_throw(guard);
        Ok(())
    }

    #[inline]
    fn sentinel_exit() {
        exported::sentinel_exit();
    }

    #[inline]
    fn reserve<T>(buffer: &mut Vec<T>, additional: usize) -> Result<(), Infallible> {
        buffer.reserve(additional);
        Ok(())
    }
}

impl ExceptionSpec for MayThrow {
    type Error = CallFault;

    const NAME: &'static str = "may-throw";
    const MAY_THROW: bool = true;

    fn raise() -> Result<(), CallFault> {
        Err(CallFault::injected())
    }

    #[inline]
    fn exported_func(guard: ThrowGuard) -> Result<(), CallFault> {
        exported::exported_func_may_throw(guard)
    }

    #[inline]
    fn sentinel_enter(guard: ThrowGuard) -> Result<(), CallFault> {
        exported::sentinel_enter_may_throw(guard)
    }

    #[inline]
    fn sentinel_exit() {
        exported::sentinel_exit();
    }

    #[inline]
    fn reserve<T>(buffer: &mut Vec<T>, additional: usize) -> Result<(), CallFault> {
        buffer.try_reserve(additional)?;
        Ok(())
    }
}

/// Fails only when `guard.do_throw` is set, which real measurements never do.
///
/// Debug builds assert before raising; optimized builds raise only when
/// `guard.raise` is set.
#[inline(always)]
pub fn throw_exception_if<S: ExceptionSpec>(guard: ThrowGuard) -> Result<(), S::Error> {
    if guard.do_throw {
        debug_assert!(
            !guard.do_throw,
            "throw_exception_if must only be called with do_throw = false"
        );
        if guard.raise {
            return S::raise();
        }
    }
    Ok(())
}

/// Returns `false` in a way the optimizer cannot prove.
pub fn get_false() -> bool {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() == 0)
        .unwrap_or(false)
}
