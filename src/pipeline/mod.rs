//! Stream composition primitives.
//!
//! A [`Pipeline`] starts from a producer stream and threads it through any
//! number of [`StreamStage`]s, each of which may change the item type:
//!
//! ```rust,ignore
//! let stream = Pipeline::new(producer)
//!     .pipe(StageCounter::new(TransferStage::Entities, results.clone()))
//!     .pipe(MapStage::new(|raw: RawEntity| Ok(Entity::from(raw))))
//!     .into_stream();
//! ```
//!
//! Stages are lazy adapters over the upstream stream: nothing is pulled from
//! upstream until the caller polls, and no stage holds more than the item it
//! is currently forwarding. Errors and end-of-stream pass through untouched,
//! and the composed stream stops after the first error.

mod counter;

pub use counter::StageCounter;

use futures::stream::{self, BoxStream, StreamExt};

use crate::error::StreamError;

/// A boxed, owned stream of records.
pub type RecordStream<T> = BoxStream<'static, Result<T, StreamError>>;

/// A boxed stage taking `In` records and yielding `Out` records.
pub type BoxStage<In, Out> = Box<dyn StreamStage<In, Output = Out>>;

/// One step of a pipeline: wraps an upstream stream into a downstream one.
pub trait StreamStage<In>: Send {
    type Output;

    fn apply(self: Box<Self>, input: RecordStream<In>) -> RecordStream<Self::Output>;
}

/// Ordered composition of a producer and the stages applied to it.
pub struct Pipeline<T> {
    stream: RecordStream<T>,
    stages: usize,
}

impl<T: Send + 'static> Pipeline<T> {
    /// Start a pipeline from a producer stream.
    pub fn new(producer: RecordStream<T>) -> Self {
        Self {
            stream: producer,
            stages: 0,
        }
    }

    /// Append a stage.
    pub fn pipe<S>(self, stage: S) -> Pipeline<S::Output>
    where
        S: StreamStage<T> + 'static,
    {
        self.pipe_boxed(Box::new(stage))
    }

    /// Append an already boxed stage.
    pub fn pipe_boxed<U>(self, stage: BoxStage<T, U>) -> Pipeline<U> {
        Pipeline {
            stream: stage.apply(self.stream),
            stages: self.stages + 1,
        }
    }

    /// Number of stages appended after the producer.
    pub fn len(&self) -> usize {
        self.stages
    }

    pub fn is_empty(&self) -> bool {
        self.stages == 0
    }

    /// Finish the pipeline. The resulting stream ends right after the first
    /// error it yields, and upstream is not polled again after that error.
    pub fn into_stream(self) -> RecordStream<T> {
        stream::unfold(Some(self.stream), |upstream| async move {
            let mut upstream = upstream?;
            let item = upstream.next().await?;
            // Dropping upstream on error keeps later records from reaching
            // any stage, counters included.
            let rest = if item.is_err() { None } else { Some(upstream) };
            Some((item, rest))
        })
        .boxed()
    }
}

/// Stage built from a closure over the whole upstream stream.
pub struct FnStage<F> {
    f: F,
}

impl<F> FnStage<F> {
    pub fn new<In, Out>(f: F) -> Self
    where
        F: FnOnce(RecordStream<In>) -> RecordStream<Out> + Send,
    {
        Self { f }
    }
}

impl<In, Out, F> StreamStage<In> for FnStage<F>
where
    F: FnOnce(RecordStream<In>) -> RecordStream<Out> + Send,
{
    type Output = Out;

    fn apply(self: Box<Self>, input: RecordStream<In>) -> RecordStream<Out> {
        (self.f)(input)
    }
}

/// Stage mapping each record through a fallible closure.
///
/// A mapping failure is yielded in place of the record; upstream errors are
/// forwarded as they are.
pub struct MapStage<F> {
    f: F,
}

impl<F> MapStage<F> {
    pub fn new<In, Out>(f: F) -> Self
    where
        F: FnMut(In) -> Result<Out, StreamError> + Send + 'static,
    {
        Self { f }
    }
}

impl<In, Out, F> StreamStage<In> for MapStage<F>
where
    In: Send + 'static,
    Out: Send + 'static,
    F: FnMut(In) -> Result<Out, StreamError> + Send + 'static,
{
    type Output = Out;

    fn apply(self: Box<Self>, input: RecordStream<In>) -> RecordStream<Out> {
        let mut f = self.f;
        input.map(move |item| item.and_then(&mut f)).boxed()
    }
}
