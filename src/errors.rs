use thiserror::Error;

#[derive(Debug, Error)]
pub enum BenchError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("unsupported clock: {0}")]
    UnsupportedClock(String),
    #[error("{variant} callee reported a fault: {message}")]
    CallFault {
        variant: &'static str,
        message: String,
    },
    #[error("io error: {0}")]
    Io(String),
}

impl BenchError {
    pub fn invalid_config<T: Into<String>>(msg: T) -> Self {
        BenchError::InvalidConfig(msg.into())
    }

    pub fn unsupported_clock<T: Into<String>>(msg: T) -> Self {
        BenchError::UnsupportedClock(msg.into())
    }

    pub fn call_fault<T: Into<String>>(variant: &'static str, msg: T) -> Self {
        BenchError::CallFault {
            variant,
            message: msg.into(),
        }
    }

    pub fn io<T: Into<String>>(msg: T) -> Self {
        BenchError::Io(msg.into())
    }

    /// Exit status the binary reports for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            BenchError::InvalidConfig(_) | BenchError::UnsupportedClock(_) => 2,
            BenchError::CallFault { .. } | BenchError::Io(_) => 1,
        }
    }
}
