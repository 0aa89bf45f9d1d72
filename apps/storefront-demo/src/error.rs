//! # Demo Error Type
//!
//! Everything a command can fail with, printed by `main` on exit.

use storefront_core::{CoreError, ValidationError};
use storefront_state::StateError;
use thiserror::Error;

pub type DemoResult<T> = Result<T, DemoError>;

#[derive(Debug, Error)]
pub enum DemoError {
    /// Bad command line; the message says what was expected.
    #[error("{0}\nRun with --help for usage.")]
    Usage(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    /// A login or signup form field was rejected.
    #[error("invalid form: {0}")]
    Form(#[from] ValidationError),

    #[error(transparent)]
    State(#[from] StateError),

    /// Writing command output failed.
    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}

impl DemoError {
    pub fn usage(message: impl Into<String>) -> Self {
        DemoError::Usage(message.into())
    }
}
