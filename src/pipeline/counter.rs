use futures::stream::StreamExt;

use super::{RecordStream, StreamStage};
use crate::results::TransferResults;
use crate::stage::TransferStage;

/// Passthrough stage counting every record that flows through it.
///
/// The count for its stage is bumped as each record is handed downstream, so
/// a partially drained stream reports exactly what the caller has seen.
/// Errors are forwarded without being counted.
#[derive(Debug, Clone)]
pub struct StageCounter {
    stage: TransferStage,
    results: TransferResults,
}

impl StageCounter {
    pub fn new(stage: TransferStage, results: TransferResults) -> Self {
        Self { stage, results }
    }
}

impl<T: Send + 'static> StreamStage<T> for StageCounter {
    type Output = T;

    fn apply(self: Box<Self>, input: RecordStream<T>) -> RecordStream<T> {
        let StageCounter { stage, results } = *self;
        input
            .inspect(move |item| {
                if item.is_ok() {
                    let items = results.increment(stage);
                    tracing::trace!(%stage, items, "record passed");
                }
            })
            .boxed()
    }
}
