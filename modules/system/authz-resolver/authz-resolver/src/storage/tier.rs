//! Routes storage calls by access tier.

use std::sync::Arc;

use authz_resolver_sdk::{Access, ResourceStore};

use super::DemoDiscardStore;

/// Pairs a persisted store with the demo discard store.
pub struct TierRoutedStore<R> {
    persisted: Arc<dyn ResourceStore<R>>,
    discard: DemoDiscardStore<R>,
}

impl<R> TierRoutedStore<R>
where
    R: Send + Sync + 'static,
{
    #[must_use]
    pub fn new(persisted: Arc<dyn ResourceStore<R>>) -> Self {
        Self {
            persisted,
            discard: DemoDiscardStore::new(),
        }
    }

    /// The store an operation with `access` must use.
    #[must_use]
    pub fn select(&self, access: &Access) -> &dyn ResourceStore<R> {
        match access {
            Access::Ephemeral => &self.discard,
            Access::Granted(_) => self.persisted.as_ref(),
        }
    }

    /// The persisted store, for reads that are already authorized.
    #[must_use]
    pub fn persisted(&self) -> &dyn ResourceStore<R> {
        self.persisted.as_ref()
    }
}
