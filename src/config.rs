//! Runtime configuration, read from the environment
//!
//! Every field can be set with an `AUCTION_`-prefixed variable, e.g.
//! `AUCTION_BIDDERS=4` or `AUCTION_RUN_FOR_SECS=10`. `RUST_LOG` is honoured
//! for `log` too; `AUCTION_LOG` wins if both are set.
use figment::{providers::Env, Figment};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Log filter directive, `tracing_subscriber::EnvFilter` syntax
    pub log: String,
    /// Number of simulated bidders to run
    pub bidders: usize,
    /// How much a simulated bidder adds on top of the current highest offer
    pub bid_step: f64,
    /// Ceiling no simulated bidder will offer above
    pub max_bid: f64,
    pub bid_interval_ms: u64,
    pub report_interval_ms: u64,
    /// Stop after this many seconds; run until Ctrl-C when unset
    pub run_for_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log: "info".to_owned(),
            bidders: 3,
            bid_step: 10.0,
            max_bid: 1000.0,
            bid_interval_ms: 200,
            report_interval_ms: 1000,
            run_for_secs: None,
        }
    }
}

impl Config {
    pub const PREFIX: &'static str = "AUCTION_";

    pub fn get() -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Env::prefixed("RUST_").split("_").only(&["log"]))
            .merge(Env::prefixed(Self::PREFIX))
            .extract::<Self>()?
            .validated()
    }

    fn validated(self) -> Result<Self, figment::Error> {
        if !(self.bid_step.is_finite() && 0.0 < self.bid_step) {
            return Err(format!("bid_step must be a positive number, got {}", self.bid_step).into());
        }
        if !self.max_bid.is_finite() {
            return Err(format!("max_bid must be a finite number, got {}", self.max_bid).into());
        }
        Ok(self)
    }

    pub fn bid_interval(&self) -> Duration {
        Duration::from_millis(self.bid_interval_ms)
    }

    pub fn report_interval(&self) -> Duration {
        Duration::from_millis(self.report_interval_ms)
    }

    pub fn run_for(&self) -> Option<Duration> {
        self.run_for_secs.map(Duration::from_secs)
    }
}
