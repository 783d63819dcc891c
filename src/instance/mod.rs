//! The backing system a source provider reads from.
//!
//! This module provides:
//! - `BackingInstance`: Schema registry and teardown of a running instance
//! - `InstanceFactory`: Asynchronous acquisition of an instance
//! - `SourceStreams`: Record producers reading from an instance
//! - `EntityTransform`: The default reshaping of raw entities
//! - In-memory implementations for testing

mod memory;
mod transform;

pub use memory::{InMemoryInstance, InMemoryStreams};
pub use transform::EntityTransform;

use std::fmt::Debug;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::BoxError;
use crate::pipeline::{BoxStage, RecordStream};
use crate::record::{ConfigurationEntry, Entity, Link, RawEntity, Schema};

/// A running instance of the content-management system.
#[async_trait]
pub trait BackingInstance: Send + Sync + Debug + 'static {
    /// Every content-type schema, in registry order.
    fn content_types(&self) -> Vec<Schema>;

    /// Every reusable-component schema, in registry order.
    fn components(&self) -> Vec<Schema>;

    /// Shut the instance down and release its resources.
    async fn destroy(&self) -> Result<(), BoxError>;
}

/// Produces the backing instance a provider bootstraps with.
#[async_trait]
pub trait InstanceFactory<I: ?Sized>: Send + Sync {
    async fn acquire(&self) -> Result<Arc<I>, BoxError>;
}

#[async_trait]
impl<I, F, Fut> InstanceFactory<I> for F
where
    I: ?Sized + Send + Sync + 'static,
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<Arc<I>, BoxError>> + Send + 'static,
{
    async fn acquire(&self) -> Result<Arc<I>, BoxError> {
        (self)().await
    }
}

/// Factories for the raw record streams of a backing instance.
pub trait SourceStreams<I: ?Sized>: Send + Sync {
    fn entities(&self, instance: &Arc<I>) -> RecordStream<RawEntity>;

    fn links(&self, instance: &Arc<I>) -> RecordStream<Link>;

    fn configuration(&self, instance: &Arc<I>) -> RecordStream<ConfigurationEntry>;

    /// Stage reshaping raw entities into transfer records.
    fn entity_transform(&self) -> BoxStage<RawEntity, Entity> {
        Box::new(EntityTransform)
    }
}
