//! Catalog of auctionable items
//!
//! The catalog owns every item record. Bidding state of each item sits
//! behind its own lock (see [`CatalogItem`]), so the catalog-wide lock only
//! guards the structure itself: which items exist and in what order.
mod in_memory;

pub use self::in_memory::*;

use crate::auction::{Amount, BiddingState, Item, ItemName, ItemNameRef, ItemType, Offer, OfferResult};
use parking_lot::Mutex;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("item already registered: {0}")]
    DuplicateItem(ItemName),
    #[error("item {0} has a floor that is not a finite number: {1}")]
    NonFiniteFloor(ItemName, Amount),
}

/// A store of items that can be listed, looked up and grown
///
/// Must be thread-safe: listing may run concurrently with registration
/// and with offers being applied to individual items.
pub trait Catalog {
    /// Snapshot of every item, in registration order
    fn all_items(&self) -> Vec<Item>;

    /// Snapshot of every item of exactly `item_type`, in registration order
    fn items_by_type(&self, item_type: &str) -> Vec<Item>;

    fn find_by_name(&self, name: ItemNameRef) -> Option<ItemHandle>;

    fn register(&self, item: Item) -> Result<(), CatalogError>;
}

pub type SharedCatalog = Arc<dyn Catalog + Send + Sync + 'static>;

pub type ItemHandle = Arc<CatalogItem>;

/// An item as held by the catalog
///
/// Name and type never change after registration. The bidding state is
/// only changed by [`CatalogItem::handle_offer`], inside the per-item
/// critical section.
#[derive(Debug)]
pub struct CatalogItem {
    name: ItemName,
    item_type: ItemType,
    state: Mutex<BiddingState>,
}

impl CatalogItem {
    pub fn new(item: Item) -> Self {
        Self {
            name: item.name,
            item_type: item.item_type,
            state: Mutex::new(item.state),
        }
    }

    pub fn name(&self) -> ItemNameRef<'_> {
        &self.name
    }

    pub fn item_type(&self) -> &str {
        &self.item_type
    }

    /// Compare `offer` against the highest one and keep it if it wins
    pub fn handle_offer(&self, offer: Offer) -> OfferResult {
        self.state.lock().handle_offer(offer)
    }

    /// Hold the critical section, so tests can show who waits on it
    #[cfg(test)]
    pub fn lock(&self) -> parking_lot::MutexGuard<'_, BiddingState> {
        self.state.lock()
    }

    /// Copy the item out, reading its bidding state in one atomic step
    pub fn snapshot(&self) -> Item {
        Item {
            name: self.name.clone(),
            item_type: self.item_type.clone(),
            state: self.state.lock().clone(),
        }
    }
}
