use std::marker::PhantomData;

use crate::{ExceptionSpec, ThrowGuard};

/// Stack object owned by every recursion frame. Its construction goes through
/// the out-of-line callee of `S`, and so can fail for [`crate::MayThrow`].
#[must_use]
pub struct Sentinel<S: ExceptionSpec> {
    _spec: PhantomData<S>,
}

impl<S: ExceptionSpec> Sentinel<S> {
    #[inline]
    pub fn new(guard: ThrowGuard) -> Result<Self, S::Error> {
        S::sentinel_enter(guard)?;
        Ok(Self { _spec: PhantomData })
    }
}

impl<S: ExceptionSpec> Drop for Sentinel<S> {
    #[inline]
    fn drop(&mut self) {
        S::sentinel_exit();
    }
}
