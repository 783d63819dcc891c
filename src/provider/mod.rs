//! Source providers.
//!
//! This module provides:
//! - `SourceProvider`: The contract a transfer engine reads through
//! - `LocalSourceProvider`: A provider reading from a backing instance it bootstraps
//! - `InstanceState`: Lifecycle of that backing instance

mod local;
mod state;

pub use local::{DEFAULT_PROVIDER_NAME, LocalSourceProvider};
pub use state::InstanceState;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ProviderError;
use crate::pipeline::RecordStream;
use crate::record::{ConfigurationEntry, Entity, Link, Schema};
use crate::results::TransferResults;
use crate::stage::ProviderType;

/// Source side of a transfer.
///
/// `bootstrap` must complete before any stream or schema operation; those
/// fail immediately with a usage error otherwise. Streams are independent
/// and may be drained concurrently.
#[async_trait]
pub trait SourceProvider: Send + Sync {
    fn name(&self) -> &str;

    fn provider_type(&self) -> ProviderType {
        ProviderType::Source
    }

    /// Acquire the backing instance.
    async fn bootstrap(&mut self) -> Result<(), ProviderError>;

    /// Release the backing instance.
    async fn close(&mut self) -> Result<(), ProviderError>;

    /// Transfer metadata. Not provided by any source yet.
    async fn get_metadata(&self) -> Option<Value>;

    /// All content-type schemas followed by all component schemas.
    fn get_schemas(&self) -> Result<Vec<Schema>, ProviderError>;

    fn stream_entities(&self) -> Result<RecordStream<Entity>, ProviderError>;

    fn stream_links(&self) -> Result<RecordStream<Link>, ProviderError>;

    fn stream_configuration(&self) -> Result<RecordStream<ConfigurationEntry>, ProviderError>;

    fn stream_schemas(&self) -> Result<RecordStream<Schema>, ProviderError>;

    /// Per-stage item counts so far.
    fn results(&self) -> &TransferResults;
}
