use std::collections::TryReserveError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CallFault {
    #[error("fault injected into a may-throw callee")]
    Injected,
    #[error("capacity reservation failed: {0}")]
    Reserve(#[from] TryReserveError),
}

impl CallFault {
    pub fn injected() -> Self {
        CallFault::Injected
    }
}
