use std::sync::{Arc, RwLock};

use gala_core::{
    Aggregate, AggregateRoot, CatalogItemId, DomainError, DomainResult, ExpectedVersion,
};

use crate::catalog::{Catalog, CatalogCommand, CatalogEvent};
use crate::item::CatalogItem;

/// Injectable catalog repository.
///
/// Views and the quotation builder depend on this trait instead of owning a
/// list, so they can be exercised without any UI around them.
pub trait CatalogStore: Send + Sync {
    /// Decide and apply a command if the catalog is at `expected`.
    fn dispatch(
        &self,
        command: CatalogCommand,
        expected: ExpectedVersion,
    ) -> DomainResult<Vec<CatalogEvent>>;
    fn get(&self, item_id: CatalogItemId) -> Option<CatalogItem>;
    fn list(&self) -> Vec<CatalogItem>;
    fn search(&self, term: &str) -> Vec<CatalogItem>;
    fn filter(&self, term: &str, category: Option<&str>) -> Vec<CatalogItem>;
    fn version(&self) -> u64;
}

impl<S> CatalogStore for Arc<S>
where
    S: CatalogStore + ?Sized,
{
    fn dispatch(
        &self,
        command: CatalogCommand,
        expected: ExpectedVersion,
    ) -> DomainResult<Vec<CatalogEvent>> {
        (**self).dispatch(command, expected)
    }

    fn get(&self, item_id: CatalogItemId) -> Option<CatalogItem> {
        (**self).get(item_id)
    }

    fn list(&self) -> Vec<CatalogItem> {
        (**self).list()
    }

    fn search(&self, term: &str) -> Vec<CatalogItem> {
        (**self).search(term)
    }

    fn filter(&self, term: &str, category: Option<&str>) -> Vec<CatalogItem> {
        (**self).filter(term, category)
    }

    fn version(&self) -> u64 {
        (**self).version()
    }
}

/// In-memory store; contents are gone when the process exits.
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    inner: RwLock<Catalog>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            inner: RwLock::new(catalog),
        }
    }

    /// Snapshot of the whole catalog (for pricing several items at once).
    pub fn snapshot(&self) -> Catalog {
        match self.inner.read() {
            Ok(c) => c.clone(),
            Err(_) => Catalog::new(),
        }
    }
}

impl CatalogStore for InMemoryCatalogStore {
    fn dispatch(
        &self,
        command: CatalogCommand,
        expected: ExpectedVersion,
    ) -> DomainResult<Vec<CatalogEvent>> {
        let mut catalog = self
            .inner
            .write()
            .map_err(|_| DomainError::conflict("catalog lock poisoned"))?;

        tracing::debug!(?command, version = catalog.version(), "dispatching catalog command");

        let result = expected
            .check(catalog.version())
            .and_then(|()| catalog.execute(&command));

        match &result {
            Ok(events) => {
                for event in events {
                    tracing::debug!(event_type = event.event_type(), "catalog event applied");
                }
            }
            Err(err) => {
                tracing::warn!(kind = err.kind(), error = %err, "catalog command rejected")
            }
        }
        result
    }

    fn get(&self, item_id: CatalogItemId) -> Option<CatalogItem> {
        let catalog = self.inner.read().ok()?;
        catalog.get(item_id).cloned()
    }

    fn list(&self) -> Vec<CatalogItem> {
        match self.inner.read() {
            Ok(c) => c.items().to_vec(),
            Err(_) => vec![],
        }
    }

    fn search(&self, term: &str) -> Vec<CatalogItem> {
        match self.inner.read() {
            Ok(c) => c.search(term).into_iter().cloned().collect(),
            Err(_) => vec![],
        }
    }

    fn filter(&self, term: &str, category: Option<&str>) -> Vec<CatalogItem> {
        match self.inner.read() {
            Ok(c) => c.filter(term, category).into_iter().cloned().collect(),
            Err(_) => vec![],
        }
    }

    fn version(&self) -> u64 {
        self.inner.read().map(|c| c.version()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AddItem, RemoveItem};
    use crate::item::tests::stage_light;

    #[test]
    fn dispatch_applies_events() {
        let store = InMemoryCatalogStore::new();
        let item = stage_light();
        let events = store
            .dispatch(
                CatalogCommand::AddItem(AddItem { item: item.clone() }),
                ExpectedVersion::Exact(0),
            )
            .unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(store.version(), 1);
        assert_eq!(store.get(item.id), Some(item.clone()));
        assert_eq!(store.list(), vec![item]);
    }

    #[test]
    fn stale_version_is_rejected_without_applying() {
        let store = InMemoryCatalogStore::new();
        let item = stage_light();
        let err = store
            .dispatch(
                CatalogCommand::AddItem(AddItem { item }),
                ExpectedVersion::Exact(7),
            )
            .unwrap_err();

        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(store.version(), 0);
        assert!(store.list().is_empty());
    }

    #[test]
    fn rejected_command_leaves_state_untouched() {
        let item = stage_light();
        let store = InMemoryCatalogStore::with_catalog(Catalog::seeded([item]).unwrap());
        let err = store
            .dispatch(
                CatalogCommand::RemoveItem(RemoveItem {
                    item_id: CatalogItemId::new(),
                }),
                ExpectedVersion::Any,
            )
            .unwrap_err();

        assert_eq!(err, DomainError::NotFound);
        assert_eq!(store.list().len(), 1);
        assert_eq!(store.version(), 1);
    }

    #[test]
    fn shared_through_arc() {
        let store: Arc<dyn CatalogStore> = Arc::new(InMemoryCatalogStore::new());
        let item = stage_light();
        store
            .dispatch(CatalogCommand::AddItem(AddItem { item }), ExpectedVersion::Any)
            .unwrap();
        assert_eq!(store.search("led").len(), 1);
        assert_eq!(store.search("loa").len(), 0);
        assert_eq!(store.filter("led", Some("lighting")).len(), 1);
        assert!(store.filter("led", Some("speakers")).is_empty());
    }
}
