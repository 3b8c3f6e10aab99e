use super::*;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Default)]
struct Entries {
    ordered: Vec<ItemHandle>,
    by_name: BTreeMap<ItemName, ItemHandle>,
}

/// Catalog kept entirely in memory
#[derive(Default)]
pub struct InMemoryCatalog {
    entries: RwLock<Entries>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a shared catalog out of `items`, failing on the first duplicate name
    pub fn from_items(
        items: impl IntoIterator<Item = Item>,
    ) -> Result<SharedCatalog, CatalogError> {
        let catalog = Self::new();
        for item in items {
            catalog.register(item)?;
        }
        Ok(Arc::new(catalog))
    }

    /// Clone the handles so no catalog lock is held while items are read
    fn handles(&self) -> Vec<ItemHandle> {
        self.entries.read().ordered.clone()
    }
}

impl Catalog for InMemoryCatalog {
    fn all_items(&self) -> Vec<Item> {
        self.handles().iter().map(|item| item.snapshot()).collect()
    }

    fn items_by_type(&self, item_type: &str) -> Vec<Item> {
        self.handles()
            .iter()
            .filter(|item| item.item_type() == item_type)
            .map(|item| item.snapshot())
            .collect()
    }

    fn find_by_name(&self, name: ItemNameRef) -> Option<ItemHandle> {
        self.entries.read().by_name.get(name).cloned()
    }

    fn register(&self, item: Item) -> Result<(), CatalogError> {
        let floor = item.highest_offer();
        if !floor.is_finite() {
            return Err(CatalogError::NonFiniteFloor(item.name, floor));
        }

        let mut entries = self.entries.write();

        if entries.by_name.contains_key(&item.name) {
            return Err(CatalogError::DuplicateItem(item.name));
        }

        debug!(item = %item.name, item_type = %item.item_type, "registering item");
        let handle = Arc::new(CatalogItem::new(item));
        entries
            .by_name
            .insert(handle.name().to_owned(), handle.clone());
        entries.ordered.push(handle);
        Ok(())
    }
}
