use super::*;
use crate::auction::{Amount, Bidder, OfferResult};
use tracing::{debug, info};

/// A bidder that keeps outbidding everyone, item after item, up to a ceiling
pub struct SimulatedBidder {
    engine: BiddingEngine,
    bidder: Bidder,
    step: Amount,
    max_bid: Amount,
    interval: Duration,
    next_item: usize,
}

impl SimulatedBidder {
    pub fn new(
        engine: BiddingEngine,
        bidder: Bidder,
        step: Amount,
        max_bid: Amount,
        interval: Duration,
    ) -> Self {
        Self {
            engine,
            bidder,
            step,
            max_bid,
            interval,
            next_item: 0,
        }
    }

    /// Try to outbid the current leader of the next item in line
    ///
    /// Returns `None` when there was nothing worth offering: the catalog is
    /// empty, we already lead, or outbidding would go over `max_bid`.
    pub fn bid_once(&mut self) -> Result<Option<OfferResult>> {
        let items = self.engine.list_items();
        if items.is_empty() {
            return Ok(None);
        }

        let item = &items[self.next_item % items.len()];
        self.next_item = self.next_item.wrapping_add(1);

        if item.current_bidder() == Some(&self.bidder) {
            return Ok(None);
        }

        let amount = item.highest_offer() + self.step;
        if self.max_bid < amount {
            debug!(bidder = %self.bidder, item = %item.name, amount, "over budget");
            return Ok(None);
        }

        let res = self
            .engine
            .submit_offer(&item.name, amount, self.bidder.clone())?;
        if res.is_accepted() {
            info!(
                bidder = %self.bidder,
                contact = ?self.bidder.contact(),
                item = %item.name,
                amount,
                "now leading"
            );
        }
        Ok(Some(res))
    }
}

impl LoopService for SimulatedBidder {
    fn get_service_id(&self) -> ServiceId {
        format!("bidder-{}", self.bidder)
    }

    fn run_iteration(&mut self) -> Result<()> {
        // don't hog the cpu
        thread::sleep(self.interval);
        self.bid_once()?;
        Ok(())
    }
}
