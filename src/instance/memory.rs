//! In-memory backing instance for testing.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use futures::stream::{self, StreamExt};

use super::{BackingInstance, SourceStreams};
use crate::error::{BoxError, StreamError};
use crate::pipeline::RecordStream;
use crate::record::{ConfigurationEntry, Link, RawEntity, Schema};
use crate::stage::TransferStage;

/// Backing instance holding its schemas and records in memory.
#[derive(Debug, Default)]
pub struct InMemoryInstance {
    content_types: Vec<Schema>,
    components: Vec<Schema>,
    entities: Vec<RawEntity>,
    links: Vec<Link>,
    configuration: Vec<ConfigurationEntry>,
    destroy_error: Option<String>,
    destroy_calls: AtomicUsize,
}

impl InMemoryInstance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content_types(mut self, schemas: Vec<Schema>) -> Self {
        self.content_types = schemas;
        self
    }

    pub fn with_components(mut self, schemas: Vec<Schema>) -> Self {
        self.components = schemas;
        self
    }

    pub fn with_entities(mut self, entities: Vec<RawEntity>) -> Self {
        self.entities = entities;
        self
    }

    pub fn with_links(mut self, links: Vec<Link>) -> Self {
        self.links = links;
        self
    }

    pub fn with_configuration(mut self, entries: Vec<ConfigurationEntry>) -> Self {
        self.configuration = entries;
        self
    }

    /// Make `destroy` fail with the given message.
    pub fn with_failing_destroy(mut self, message: impl Into<String>) -> Self {
        self.destroy_error = Some(message.into());
        self
    }

    /// How many times `destroy` has been called.
    pub fn destroy_count(&self) -> usize {
        self.destroy_calls.load(Ordering::SeqCst)
    }

    pub fn entities(&self) -> &[RawEntity] {
        &self.entities
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn configuration(&self) -> &[ConfigurationEntry] {
        &self.configuration
    }
}

#[async_trait]
impl BackingInstance for InMemoryInstance {
    fn content_types(&self) -> Vec<Schema> {
        self.content_types.clone()
    }

    fn components(&self) -> Vec<Schema> {
        self.components.clone()
    }

    async fn destroy(&self) -> Result<(), BoxError> {
        self.destroy_calls.fetch_add(1, Ordering::SeqCst);
        match &self.destroy_error {
            Some(message) => Err(message.clone().into()),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct InjectedFailure {
    stage: TransferStage,
    after: usize,
    resume: bool,
}

/// Record producers reading lazily from an [`InMemoryInstance`].
///
/// Clones share one pull counter.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStreams {
    failure: Option<InjectedFailure>,
    pulls: Arc<AtomicUsize>,
}

impl InMemoryStreams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the producer for `stage` fail after yielding `items` records.
    pub fn fail_after(mut self, stage: TransferStage, items: usize) -> Self {
        self.failure = Some(InjectedFailure {
            stage,
            after: items,
            resume: false,
        });
        self
    }

    /// Like [`fail_after`](Self::fail_after), but the producer carries on with
    /// the remaining records after the error.
    pub fn fail_and_resume(mut self, stage: TransferStage, items: usize) -> Self {
        self.failure = Some(InjectedFailure {
            stage,
            after: items,
            resume: true,
        });
        self
    }

    /// Items (records and injected errors) pulled from any producer so far.
    pub fn pulled(&self) -> usize {
        self.pulls.load(Ordering::SeqCst)
    }

    fn produce<T>(
        &self,
        instance: &Arc<InMemoryInstance>,
        stage: TransferStage,
        select: fn(&InMemoryInstance) -> &[T],
    ) -> RecordStream<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        let instance = Arc::clone(instance);
        let pulls = Arc::clone(&self.pulls);
        let len = select(&instance).len();

        // Position of the injected error, and how many items the producer yields.
        let (fail_at, total) = match self.failure {
            Some(failure) if failure.stage == stage => {
                let at = failure.after.min(len);
                (Some(at), if failure.resume { len + 1 } else { at + 1 })
            }
            _ => (None, len),
        };

        let items = (0..total).map(move |pos| {
            pulls.fetch_add(1, Ordering::SeqCst);
            match fail_at {
                Some(at) if pos == at => {
                    Err(StreamError::new(stage, "injected producer failure"))
                }
                Some(at) if pos > at => Ok(select(&instance)[pos - 1].clone()),
                _ => Ok(select(&instance)[pos].clone()),
            }
        });
        stream::iter(items).boxed()
    }
}

impl SourceStreams<InMemoryInstance> for InMemoryStreams {
    fn entities(&self, instance: &Arc<InMemoryInstance>) -> RecordStream<RawEntity> {
        self.produce(instance, TransferStage::Entities, InMemoryInstance::entities)
    }

    fn links(&self, instance: &Arc<InMemoryInstance>) -> RecordStream<Link> {
        self.produce(instance, TransferStage::Links, InMemoryInstance::links)
    }

    fn configuration(&self, instance: &Arc<InMemoryInstance>) -> RecordStream<ConfigurationEntry> {
        self.produce(
            instance,
            TransferStage::Configuration,
            InMemoryInstance::configuration,
        )
    }
}
