//! Error types for the source provider.
//!
//! This module provides:
//! - `Operation`: The provider operation a usage error refers to
//! - `StreamError`: An error raised by a producer or transform stage, with its transfer stage
//! - `ProviderError`: Usage, acquisition and teardown failures of the provider itself

use std::fmt;

use thiserror::Error;

use crate::stage::TransferStage;

/// Boxed error type carried across collaborator boundaries.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Provider operations that need a ready backing instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    StreamEntities,
    StreamLinks,
    StreamConfiguration,
    StreamSchemas,
    GetSchemas,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::StreamEntities => "stream entities",
            Operation::StreamLinks => "stream links",
            Operation::StreamConfiguration => "stream configuration",
            Operation::StreamSchemas => "stream schemas",
            Operation::GetSchemas => "get schemas",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error flowing through a record stream.
///
/// Stages never wrap or rewrite these; a stream ends with exactly the error
/// its producer or transform raised.
#[derive(Debug)]
pub struct StreamError {
    /// Stage whose stream raised the error
    pub stage: TransferStage,
    /// The underlying error
    pub error: BoxError,
}

impl StreamError {
    pub fn new(stage: TransferStage, error: impl Into<BoxError>) -> Self {
        Self {
            stage,
            error: error.into(),
        }
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.stage, self.error)
    }
}

impl std::error::Error for StreamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.error.as_ref())
    }
}

#[derive(Debug, Error)]
pub enum ProviderError {
    /// An operation was called before `bootstrap` stored a backing instance.
    #[error("Not able to {operation}. Backing instance not found")]
    NotReady { operation: Operation },

    /// An operation was called after `close`.
    #[error("Not able to {operation}. Provider has been closed")]
    Closed { operation: Operation },

    #[error("failed to acquire backing instance: {0}")]
    Acquire(#[source] BoxError),

    #[error("failed to destroy backing instance: {0}")]
    Destroy(#[source] BoxError),
}

impl ProviderError {
    /// The operation a usage error was raised for.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            ProviderError::NotReady { operation } | ProviderError::Closed { operation } => {
                Some(*operation)
            }
            _ => None,
        }
    }

    /// Whether this error comes from calling the provider in the wrong state.
    pub fn is_usage_error(&self) -> bool {
        self.operation().is_some()
    }
}

#[cfg(feature = "miette")]
mod miette_impl;

#[cfg(feature = "miette")]
pub use miette_impl::*;
