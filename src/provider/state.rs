use std::sync::Arc;

/// Lifecycle of the backing instance held by a provider.
#[derive(Debug)]
pub enum InstanceState<I: ?Sized> {
    /// Constructed; `bootstrap` has not stored an instance yet.
    Uninitialized,
    /// Instance acquired; streams may be requested.
    Ready(Arc<I>),
    /// `close` ran; the instance is kept but must not be used.
    Closed(Arc<I>),
}

impl<I: ?Sized> InstanceState<I> {
    pub fn is_ready(&self) -> bool {
        matches!(self, InstanceState::Ready(_))
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, InstanceState::Closed(_))
    }

    /// The instance handle, whether or not it is still usable.
    pub fn handle(&self) -> Option<&Arc<I>> {
        match self {
            InstanceState::Uninitialized => None,
            InstanceState::Ready(instance) | InstanceState::Closed(instance) => Some(instance),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InstanceState::Uninitialized => "uninitialized",
            InstanceState::Ready(_) => "ready",
            InstanceState::Closed(_) => "closed",
        }
    }
}
