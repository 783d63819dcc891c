//! Runtime options of a source provider.

use std::fmt;
use std::sync::Arc;

use super::ProviderSettings;
use crate::instance::InstanceFactory;

/// Options a [`LocalSourceProvider`](crate::LocalSourceProvider) is built from.
pub struct ProviderOptions<I: ?Sized> {
    acquire: Arc<dyn InstanceFactory<I>>,
    auto_destroy: Option<bool>,
    name: Option<String>,
}

impl<I: ?Sized> ProviderOptions<I> {
    /// Create options acquiring the backing instance through `factory`.
    pub fn new<F>(factory: F) -> Self
    where
        F: InstanceFactory<I> + 'static,
    {
        Self {
            acquire: Arc::new(factory),
            auto_destroy: None,
            name: None,
        }
    }

    /// Build options from parsed settings plus the acquisition factory.
    pub fn from_settings<F>(settings: ProviderSettings, factory: F) -> Self
    where
        F: InstanceFactory<I> + 'static,
    {
        Self {
            acquire: Arc::new(factory),
            auto_destroy: settings.auto_destroy,
            name: settings.name,
        }
    }

    /// Set whether `close` destroys the backing instance.
    pub fn with_auto_destroy(mut self, auto_destroy: bool) -> Self {
        self.auto_destroy = Some(auto_destroy);
        self
    }

    /// Override the provider name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The factory `bootstrap` acquires the backing instance through.
    pub fn factory(&self) -> &Arc<dyn InstanceFactory<I>> {
        &self.acquire
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Resolved auto-destroy flag: only an explicit `false` disables it.
    pub fn auto_destroy(&self) -> bool {
        matches!(self.auto_destroy, None | Some(true))
    }
}

impl<I: ?Sized> Clone for ProviderOptions<I> {
    fn clone(&self) -> Self {
        Self {
            acquire: Arc::clone(&self.acquire),
            auto_destroy: self.auto_destroy,
            name: self.name.clone(),
        }
    }
}

impl<I: ?Sized> fmt::Debug for ProviderOptions<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderOptions")
            .field("auto_destroy", &self.auto_destroy)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
