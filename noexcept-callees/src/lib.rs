//! Callees compiled as their own crate, so every exported entry point is a
//! real call across a compilation-unit boundary.
//!
//! The two call styles being compared are modelled by [`ExceptionSpec`]:
//! [`NoThrow`] can never report an error (its error type is `Infallible`),
//! while [`MayThrow`] returns `Result<_, CallFault>` and callers propagate it.

pub mod errors;
pub mod exported;
pub mod sentinel;
pub mod spec;

pub use crate::errors::CallFault;
pub use crate::sentinel::Sentinel;
pub use crate::spec::{ExceptionSpec, MayThrow, NoThrow, ThrowGuard, get_false, throw_exception_if};
