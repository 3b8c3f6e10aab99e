mod auction;
mod catalog;
mod config;
mod seed;
mod service;
mod telemetry;

use anyhow::Result;
use std::collections::BTreeSet;
use tracing::info;

fn main() -> Result<()> {
    let config = config::Config::get()?;
    telemetry::init(&config.log)?;

    let catalog = catalog::InMemoryCatalog::from_items(seed::demo_items())?;
    let engine = service::BiddingEngine::new(catalog);

    let item_types: BTreeSet<_> = engine
        .list_items()
        .into_iter()
        .map(|item| item.item_type)
        .collect();
    for item_type in item_types {
        let items: Vec<_> = engine
            .list_items_by_type(&item_type)
            .into_iter()
            .map(|item| item.name)
            .collect();
        info!(%item_type, ?items, "catalog");
    }

    let svc_ctr = service::ServiceControl::new();

    ctrlc::set_handler({
        let svc_ctr = svc_ctr.clone();
        move || {
            eprintln!("Stopping all services...");
            svc_ctr.stop_all();
        }
    })?;

    let mut handles: Vec<_> = (1..=config.bidders)
        .map(|i| {
            svc_ctr.spawn_loop(service::SimulatedBidder::new(
                engine.clone(),
                auction::Bidder::new(format!("sniper-{i}"))
                    .with_contact(format!("sniper-{i}@auction.local")),
                config.bid_step,
                config.max_bid,
                config.bid_interval(),
            ))
        })
        .collect();
    handles.push(svc_ctr.spawn_loop(service::WinnersReporter::new(
        engine.clone(),
        config.report_interval(),
    )));

    svc_ctr.wait(config.run_for());
    svc_ctr.stop_all();

    for handle in handles {
        handle.join()?
    }

    for item in engine.list_items() {
        info!(
            item = %item.name,
            claimed = item.is_claimed(),
            highest_offer = item.highest_offer(),
            bidder = ?item.current_bidder().map(|bidder| bidder.name()),
            "final state"
        );
    }

    Ok(())
}
