use std::fmt;
use thiserror::Error;

pub type ItemName = String;
pub type ItemNameRef<'s> = &'s str;
pub type ItemType = String;
pub type BidderName = String;
pub type Amount = f64;

/// A party placing offers
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bidder {
    name: BidderName,
    contact: Option<String>,
}

impl Bidder {
    pub fn new(name: impl Into<BidderName>) -> Self {
        Self {
            name: name.into(),
            contact: None,
        }
    }

    pub fn with_contact(self, contact: impl Into<String>) -> Self {
        Self {
            contact: Some(contact.into()),
            ..self
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contact(&self) -> Option<&str> {
        self.contact.as_deref()
    }
}

impl fmt::Display for Bidder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Offer {
    pub amount: Amount,
    pub bidder: Bidder,
}

impl Offer {
    pub fn new(amount: Amount, bidder: Bidder) -> Self {
        Self { amount, bidder }
    }

    /// Check the caller side of the contract: a finite amount and a named bidder
    pub fn ensure_valid(&self) -> Result<(), OfferError> {
        if !self.amount.is_finite() {
            return Err(OfferError::NonFiniteAmount(self.amount));
        }
        if self.bidder.name.trim().is_empty() {
            return Err(OfferError::AnonymousBidder);
        }
        Ok(())
    }
}

/// Outcome of submitting an offer against a named item
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OfferResult {
    ItemNotFound,
    OfferAccepted,
    OfferRejected,
}

impl OfferResult {
    pub fn is_accepted(self) -> bool {
        self == OfferResult::OfferAccepted
    }
}

impl fmt::Display for OfferResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OfferResult::ItemNotFound => "item not found",
            OfferResult::OfferAccepted => "offer accepted",
            OfferResult::OfferRejected => "offer rejected",
        })
    }
}

/// The caller broke the offer contract; nothing was looked up or changed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OfferError {
    #[error("offer has no bidder identity")]
    AnonymousBidder,
    #[error("offer amount is not a finite number: {0}")]
    NonFiniteAmount(Amount),
}

/// Bidding state of a single item
///
/// An item starts `Unclaimed` at some floor and only ever moves to
/// `Claimed` through an accepted offer. The amount and the bidder of
/// the highest offer live in one value, so they can't be observed apart.
#[derive(Clone, Debug, PartialEq)]
pub enum BiddingState {
    Unclaimed { floor: Amount },
    Claimed { offer: Offer },
}

impl Default for BiddingState {
    fn default() -> Self {
        BiddingState::Unclaimed { floor: 0.0 }
    }
}

impl BiddingState {
    pub fn highest_offer(&self) -> Amount {
        match self {
            BiddingState::Unclaimed { floor } => *floor,
            BiddingState::Claimed { offer } => offer.amount,
        }
    }

    pub fn current_bidder(&self) -> Option<&Bidder> {
        match self {
            BiddingState::Unclaimed { .. } => None,
            BiddingState::Claimed { offer } => Some(&offer.bidder),
        }
    }

    pub fn is_outbid_by(&self, amount: Amount) -> bool {
        self.highest_offer() < amount
    }

    /// Apply an offer, keeping it only if it is strictly higher
    ///
    /// Ties are rejected so at most one bidder holds the item at a time.
    pub fn handle_offer(&mut self, offer: Offer) -> OfferResult {
        if self.is_outbid_by(offer.amount) {
            *self = BiddingState::Claimed { offer };
            OfferResult::OfferAccepted
        } else {
            OfferResult::OfferRejected
        }
    }
}

/// Point-in-time copy of an item
///
/// Handed out by the catalog; changing it has no effect on the catalog.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub name: ItemName,
    pub item_type: ItemType,
    pub state: BiddingState,
}

impl Item {
    pub fn new(name: impl Into<ItemName>, item_type: impl Into<ItemType>) -> Self {
        Self {
            name: name.into(),
            item_type: item_type.into(),
            state: BiddingState::default(),
        }
    }

    pub fn with_floor(self, floor: Amount) -> Self {
        Self {
            state: BiddingState::Unclaimed { floor },
            ..self
        }
    }

    pub fn highest_offer(&self) -> Amount {
        self.state.highest_offer()
    }

    pub fn current_bidder(&self) -> Option<&Bidder> {
        self.state.current_bidder()
    }

    pub fn is_claimed(&self) -> bool {
        self.current_bidder().is_some()
    }
}
