//! Source provider backed by a locally acquired CMS instance.

use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::{InstanceState, SourceProvider};
use crate::config::ProviderOptions;
use crate::error::{Operation, ProviderError};
use crate::instance::{BackingInstance, SourceStreams};
use crate::pipeline::{Pipeline, RecordStream, StageCounter};
use crate::record::{ConfigurationEntry, Entity, Link, Schema};
use crate::results::TransferResults;
use crate::stage::TransferStage;

pub const DEFAULT_PROVIDER_NAME: &str = "source::local-cms";

/// Source provider reading from a backing instance it acquires on
/// `bootstrap` and, unless told otherwise, destroys on `close`.
pub struct LocalSourceProvider<I: ?Sized, S> {
    name: String,
    options: ProviderOptions<I>,
    streams: S,
    state: InstanceState<I>,
    results: TransferResults,
}

impl<I, S> LocalSourceProvider<I, S>
where
    I: BackingInstance + ?Sized,
    S: SourceStreams<I>,
{
    pub fn new(options: ProviderOptions<I>, streams: S) -> Self {
        let name = options.name().unwrap_or(DEFAULT_PROVIDER_NAME).to_string();
        Self {
            name,
            options,
            streams,
            state: InstanceState::Uninitialized,
            results: TransferResults::new(),
        }
    }

    pub fn options(&self) -> &ProviderOptions<I> {
        &self.options
    }

    pub fn state(&self) -> &InstanceState<I> {
        &self.state
    }

    /// The ready instance, or the usage error for `operation`.
    fn instance(&self, operation: Operation) -> Result<&Arc<I>, ProviderError> {
        match &self.state {
            InstanceState::Ready(instance) => Ok(instance),
            InstanceState::Uninitialized => {
                warn!(provider = %self.name, %operation, "backing instance not bootstrapped");
                Err(ProviderError::NotReady { operation })
            }
            InstanceState::Closed(_) => {
                warn!(provider = %self.name, %operation, "provider already closed");
                Err(ProviderError::Closed { operation })
            }
        }
    }

    fn counter(&self, stage: TransferStage) -> StageCounter {
        StageCounter::new(stage, self.results.clone())
    }

    fn collect_schemas(&self, operation: Operation) -> Result<Vec<Schema>, ProviderError> {
        let instance = self.instance(operation)?;

        let mut schemas = instance.content_types();
        let content_types = schemas.len();
        schemas.extend(instance.components());

        self.results.set(TransferStage::Schemas, schemas.len() as u64);
        debug!(
            provider = %self.name,
            content_types,
            components = schemas.len() - content_types,
            "collected schemas"
        );
        Ok(schemas)
    }
}

#[async_trait]
impl<I, S> SourceProvider for LocalSourceProvider<I, S>
where
    I: BackingInstance + ?Sized,
    S: SourceStreams<I>,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn bootstrap(&mut self) -> Result<(), ProviderError> {
        let factory = Arc::clone(self.options.factory());
        let instance = factory.acquire().await.map_err(ProviderError::Acquire)?;

        if self.state.is_ready() {
            debug!(provider = %self.name, "replacing previously acquired backing instance");
        }
        self.state = InstanceState::Ready(instance);
        info!(provider = %self.name, "backing instance acquired");
        Ok(())
    }

    async fn close(&mut self) -> Result<(), ProviderError> {
        let instance = match &self.state {
            InstanceState::Ready(instance) => Arc::clone(instance),
            other => {
                debug!(provider = %self.name, state = other.as_str(), "nothing to close");
                return Ok(());
            }
        };
        self.state = InstanceState::Closed(Arc::clone(&instance));

        if !self.options.auto_destroy() {
            info!(provider = %self.name, "auto-destroy disabled, backing instance left running");
            return Ok(());
        }

        instance.destroy().await.map_err(ProviderError::Destroy)?;
        info!(provider = %self.name, "backing instance destroyed");
        Ok(())
    }

    async fn get_metadata(&self) -> Option<Value> {
        None
    }

    fn get_schemas(&self) -> Result<Vec<Schema>, ProviderError> {
        self.collect_schemas(Operation::GetSchemas)
    }

    fn stream_entities(&self) -> Result<RecordStream<Entity>, ProviderError> {
        let instance = self.instance(Operation::StreamEntities)?;
        debug!(provider = %self.name, stage = %TransferStage::Entities, "composing stream");

        // Counted before the transform so counts reflect raw producer records.
        let stream = Pipeline::new(self.streams.entities(instance))
            .pipe(self.counter(TransferStage::Entities))
            .pipe_boxed(self.streams.entity_transform())
            .into_stream();
        Ok(stream)
    }

    fn stream_links(&self) -> Result<RecordStream<Link>, ProviderError> {
        let instance = self.instance(Operation::StreamLinks)?;
        debug!(provider = %self.name, stage = %TransferStage::Links, "composing stream");

        let stream = Pipeline::new(self.streams.links(instance))
            .pipe(self.counter(TransferStage::Links))
            .into_stream();
        Ok(stream)
    }

    fn stream_configuration(&self) -> Result<RecordStream<ConfigurationEntry>, ProviderError> {
        let instance = self.instance(Operation::StreamConfiguration)?;
        debug!(provider = %self.name, stage = %TransferStage::Configuration, "composing stream");

        let stream = Pipeline::new(self.streams.configuration(instance))
            .pipe(self.counter(TransferStage::Configuration))
            .into_stream();
        Ok(stream)
    }

    fn stream_schemas(&self) -> Result<RecordStream<Schema>, ProviderError> {
        let schemas = self.collect_schemas(Operation::StreamSchemas)?;
        Ok(stream::iter(schemas.into_iter().map(Ok)).boxed())
    }

    fn results(&self) -> &TransferResults {
        &self.results
    }
}
