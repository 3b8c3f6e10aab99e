use super::*;

/// Periodically logs who is winning what
pub struct WinnersReporter {
    engine: BiddingEngine,
    interval: Duration,
}

impl WinnersReporter {
    pub fn new(engine: BiddingEngine, interval: Duration) -> Self {
        Self { engine, interval }
    }
}

impl LoopService for WinnersReporter {
    fn get_service_id(&self) -> ServiceId {
        "winners-reporter".to_owned()
    }

    fn run_iteration(&mut self) -> Result<()> {
        thread::sleep(self.interval);
        let winners = self.engine.winning_bidders();
        info!(claimed = winners.len(), ?winners, "current winners");
        Ok(())
    }
}
