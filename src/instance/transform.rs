use futures::stream::StreamExt;

use crate::pipeline::{RecordStream, StreamStage};
use crate::record::{Entity, RawEntity};

/// Reshapes `{ content_type, entity }` into `{ type, id, data }`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityTransform;

impl StreamStage<RawEntity> for EntityTransform {
    type Output = Entity;

    fn apply(self: Box<Self>, input: RecordStream<RawEntity>) -> RecordStream<Entity> {
        input.map(|item| item.map(Entity::from)).boxed()
    }
}
