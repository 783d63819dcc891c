//! # cms-transfer-source
//!
//! An instrumented source provider for a data-transfer pipeline, exposing the
//! data of a content-management system as independent record streams.
//!
//! ## Overview
//!
//! cms-transfer-source provides:
//! - **Lifecycle**: Acquire a backing instance on `bootstrap`, optionally destroy it on `close`
//! - **Record streams**: Entities, links, configuration and schemas as async streams
//! - **Stream composition**: Chain a producer through any number of stages with `Pipeline`
//! - **Instrumentation**: Per-stage item counts collected as records flow
//! - **Error handling**: Usage errors surface immediately, stream errors pass through unchanged
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use cms_transfer_source::{
//!     InMemoryInstance, InMemoryStreams, LocalSourceProvider, ProviderOptions, SourceProvider,
//! };
//! use futures::TryStreamExt;
//!
//! async fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let instance = Arc::new(InMemoryInstance::new());
//!     let options = ProviderOptions::new(move || {
//!         let instance = Arc::clone(&instance);
//!         async move { Ok(instance) }
//!     });
//!
//!     let mut provider = LocalSourceProvider::new(options, InMemoryStreams::new());
//!     provider.bootstrap().await?;
//!
//!     let entities: Vec<_> = provider.stream_entities()?.try_collect().await?;
//!     println!("{} entities, results: {:?}", entities.len(), provider.results().snapshot());
//!
//!     provider.close().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Counting semantics
//!
//! - Entities, links and configuration are counted by a `StageCounter` stage as
//!   each record is pulled by the caller. Entities are counted before the entity
//!   transform, so counts reflect raw producer records.
//! - Schemas are enumerated eagerly; `get_schemas` overwrites the `schemas`
//!   count with the number of descriptors returned.
//! - A stage that has not produced anything has no entry at all in the results,
//!   which is different from an entry with zero items.
//!
//! ## Features
//!
//! - `yaml` - Load `ProviderSettings` from YAML
//! - `miette` - Pretty error reporting with miette
//! - `demo` - Build the `cms_source_demo` binary

pub mod config;
pub mod error;
pub mod instance;
pub mod pipeline;
pub mod provider;
pub mod record;
pub mod results;
pub mod stage;

// Re-exports for convenience
pub use config::{ProviderOptions, ProviderSettings};
pub use error::{BoxError, Operation, ProviderError, StreamError};
pub use instance::{
    BackingInstance, EntityTransform, InMemoryInstance, InMemoryStreams, InstanceFactory,
    SourceStreams,
};
pub use pipeline::{BoxStage, FnStage, MapStage, Pipeline, RecordStream, StageCounter, StreamStage};
pub use provider::{DEFAULT_PROVIDER_NAME, InstanceState, LocalSourceProvider, SourceProvider};
pub use record::{
    ConfigurationEntry, ConfigurationKind, Entity, Link, LinkEnd, ModelType, RawEntity, Schema,
};
pub use results::{StageResult, TransferResults};
pub use stage::{ProviderType, TransferStage};

/// Create a local source provider from its options and record producers.
pub fn create_local_source_provider<I, S>(
    options: ProviderOptions<I>,
    streams: S,
) -> LocalSourceProvider<I, S>
where
    I: BackingInstance + ?Sized,
    S: SourceStreams<I>,
{
    LocalSourceProvider::new(options, streams)
}

/// Create a local source provider from parsed settings, letting the caller
/// further adjust the options before the provider is built.
pub fn create_local_source_provider_with<I, S, F, C>(
    settings: ProviderSettings,
    factory: F,
    streams: S,
    customize: C,
) -> LocalSourceProvider<I, S>
where
    I: BackingInstance + ?Sized,
    S: SourceStreams<I>,
    F: InstanceFactory<I> + 'static,
    C: FnOnce(ProviderOptions<I>) -> ProviderOptions<I>,
{
    let options = customize(ProviderOptions::from_settings(settings, factory));
    LocalSourceProvider::new(options, streams)
}

#[cfg(feature = "miette")]
pub use error::ProviderDiagnostic;
