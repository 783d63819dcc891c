//! Configuration types for the source provider.
//!
//! This module provides:
//! - `ProviderOptions`: Acquisition factory and teardown behavior of a provider
//! - `ProviderSettings`: The serializable part of the options, loadable from JSON/YAML

mod options;
mod settings;

pub use options::ProviderOptions;
pub use settings::ProviderSettings;
