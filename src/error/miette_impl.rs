//! Miette integration for pretty error reporting.

use miette::{Diagnostic, Severity};
use thiserror::Error;

use super::{ProviderError, StreamError};

/// A diagnostic wrapper for provider errors compatible with miette.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
pub struct ProviderDiagnostic {
    /// The error message
    pub message: String,

    #[source]
    /// The underlying error source
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,

    #[help]
    /// Help text for the user
    pub help: Option<String>,

    #[diagnostic(severity)]
    /// Severity level
    pub severity: Severity,
}

impl From<ProviderError> for ProviderDiagnostic {
    fn from(e: ProviderError) -> Self {
        let help = match &e {
            ProviderError::NotReady { .. } => "Call `bootstrap` before requesting streams",
            ProviderError::Closed { .. } => "The provider cannot be used after `close`",
            ProviderError::Acquire(_) => "Check that the backing instance can be started",
            ProviderError::Destroy(_) => "The backing instance may need to be stopped manually",
        };
        let message = e.to_string();
        let source = match e {
            ProviderError::Acquire(err) | ProviderError::Destroy(err) => Some(err),
            _ => None,
        };
        ProviderDiagnostic {
            message,
            source,
            help: Some(help.into()),
            severity: Severity::Error,
        }
    }
}

impl From<StreamError> for ProviderDiagnostic {
    fn from(e: StreamError) -> Self {
        ProviderDiagnostic {
            message: format!("stream failed during '{}'", e.stage),
            source: Some(e.error),
            help: None,
            severity: Severity::Error,
        }
    }
}

impl From<ProviderError> for miette::Report {
    fn from(e: ProviderError) -> Self {
        miette::Report::new(ProviderDiagnostic::from(e))
    }
}
