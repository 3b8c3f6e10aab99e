//! Bidding Engine
//!
//! Decides whether an offer beats the current highest offer of an item
//! and records it if it does. Each decision runs inside the critical
//! section of the item it targets, so offers on one item are applied in
//! some serial order while offers on different items never wait on each
//! other.
use crate::auction::{
    Amount, Bidder, BidderName, Item, ItemName, ItemNameRef, Offer, OfferError, OfferResult,
};
use crate::catalog::SharedCatalog;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Clone)]
pub struct BiddingEngine {
    catalog: SharedCatalog,
}

impl BiddingEngine {
    pub fn new(catalog: SharedCatalog) -> Self {
        Self { catalog }
    }

    pub fn list_items(&self) -> Vec<Item> {
        self.catalog.all_items()
    }

    pub fn list_items_by_type(&self, item_type: &str) -> Vec<Item> {
        self.catalog.items_by_type(item_type)
    }

    /// Offer `amount` for the item called `item_name` on behalf of `bidder`
    ///
    /// Only a strictly higher amount wins; an equal one is rejected.
    /// A malformed offer is refused with [`OfferError`] before the item is
    /// even looked up.
    pub fn submit_offer(
        &self,
        item_name: ItemNameRef,
        amount: Amount,
        bidder: Bidder,
    ) -> Result<OfferResult, OfferError> {
        let offer = Offer::new(amount, bidder);
        offer.ensure_valid()?;

        let Some(item) = self.catalog.find_by_name(item_name) else {
            debug!(item = %item_name, amount, "offer for unknown item");
            return Ok(OfferResult::ItemNotFound);
        };

        let bidder = offer.bidder.name().to_owned();
        let res = item.handle_offer(offer);

        debug!(item = %item_name, %bidder, amount, %res, "offer handled");
        Ok(res)
    }

    /// Current winner of every item that has accepted at least one offer
    ///
    /// Every entry is read atomically from its item, one item at a time;
    /// the catalog as a whole is never frozen while this runs.
    pub fn winning_bidders(&self) -> BTreeMap<ItemName, BidderName> {
        self.catalog
            .all_items()
            .into_iter()
            .filter_map(|item| {
                let bidder = item.current_bidder()?.name().to_owned();
                Some((item.name, bidder))
            })
            .collect()
    }
}
