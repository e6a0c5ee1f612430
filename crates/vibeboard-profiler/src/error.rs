use thiserror::Error;
use vibeboard_core::CoreError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfilerError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<CoreError> for ProfilerError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidInput(msg) => Self::InvalidInput(msg),
        }
    }
}
