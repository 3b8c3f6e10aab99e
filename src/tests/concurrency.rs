use super::*;
use crate::auction::{Amount, Bidder, OfferResult};
use std::{
    collections::BTreeMap,
    sync::{mpsc, Barrier},
    thread,
    time::Duration,
};

#[test]
fn racing_increasing_offers_converge_on_the_highest() -> Result<()> {
    const BIDDERS: usize = 16;
    let engine = engine_with([Item::new("Painting", "Art")])?;
    let barrier = Barrier::new(BIDDERS);

    let results: Vec<OfferResult> = thread::scope(|s| {
        let handles: Vec<_> = (1..=BIDDERS)
            .map(|i| {
                let (engine, barrier) = (&engine, &barrier);
                s.spawn(move || {
                    barrier.wait();
                    engine.submit_offer(
                        "Painting",
                        (i * 10) as Amount,
                        Bidder::new(format!("bidder-{i}")),
                    )
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("no panic"))
            .collect::<Result<_, _>>()
    })?;

    let accepted = results.iter().filter(|res| res.is_accepted()).count();
    assert!((1..=BIDDERS).contains(&accepted));
    assert!(results.iter().all(|res| *res != OfferResult::ItemNotFound));

    let item = &engine.list_items()[0];
    assert_eq!(item.highest_offer(), (BIDDERS * 10) as Amount);
    assert_eq!(
        item.current_bidder().map(|b| b.name().to_owned()),
        Some(format!("bidder-{BIDDERS}"))
    );
    Ok(())
}

#[test]
fn accepted_offers_form_a_serial_history() -> Result<()> {
    const THREADS: usize = 8;
    const OFFERS: usize = 500;
    let engine = engine_with([Item::new("Painting", "Art")])?;
    let barrier = Barrier::new(THREADS);

    // every amount is unique, so it identifies the thread that offered it
    let accepted: Vec<Vec<Amount>> = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let (engine, barrier) = (&engine, &barrier);
                s.spawn(move || -> Result<Vec<Amount>> {
                    let bidder = Bidder::new(format!("t{t}"));
                    let mut accepted = vec![];
                    barrier.wait();
                    for k in 0..OFFERS {
                        let amount = (k * THREADS + t) as Amount;
                        if engine
                            .submit_offer("Painting", amount, bidder.clone())?
                            .is_accepted()
                        {
                            accepted.push(amount);
                        }
                    }
                    Ok(accepted)
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("no panic"))
            .collect::<Result<_>>()
    })?;

    for per_thread in &accepted {
        assert!(per_thread.windows(2).all(|w| w[0] < w[1]));
    }

    let all: Vec<Amount> = accepted.iter().flatten().copied().collect();
    let top = all.iter().copied().fold(Amount::MIN, Amount::max);
    let top_thread = accepted
        .iter()
        .position(|per_thread| per_thread.last() == Some(&top))
        .expect("someone holds the top offer");

    assert_eq!(top, ((OFFERS - 1) * THREADS + THREADS - 1) as Amount);
    let item = &engine.list_items()[0];
    assert_eq!(item.highest_offer(), top);
    assert_eq!(
        item.current_bidder().map(|b| b.name().to_owned()),
        Some(format!("t{top_thread}"))
    );
    Ok(())
}

#[test]
fn readers_never_see_a_torn_offer() -> Result<()> {
    const WRITERS: usize = 4;
    const OFFERS: usize = 2_000;
    let engine = engine_with([Item::new("Painting", "Art"), Item::new("Vase", "Antique")])?;

    thread::scope(|s| {
        for w in 0..WRITERS {
            let engine = &engine;
            s.spawn(move || {
                for k in 0..OFFERS {
                    let amount = k * WRITERS + w + 1;
                    let item = if k % 2 == 0 { "Painting" } else { "Vase" };
                    // the bidder name carries the amount it offered
                    engine
                        .submit_offer(item, amount as Amount, Bidder::new(amount.to_string()))
                        .expect("valid offer");
                }
            });
        }

        for _ in 0..OFFERS {
            for item in engine.list_items() {
                if let Some(bidder) = item.current_bidder() {
                    let offered: Amount = bidder.name().parse().expect("numeric name");
                    assert_eq!(offered, item.highest_offer(), "torn read of {}", item.name);
                }
            }
            for (item, bidder) in engine.winning_bidders() {
                assert!(["Painting", "Vase"].contains(&item.as_str()));
                assert!(bidder.parse::<usize>().is_ok());
            }
        }
    });

    assert_eq!(engine.winning_bidders().len(), 2);
    Ok(())
}

#[test]
fn offers_on_other_items_do_not_wait() -> Result<()> {
    let catalog = catalog_with([Item::new("Painting", "Art"), Item::new("Vase", "Antique")])?;
    let engine = BiddingEngine::new(catalog.clone());
    let painting = catalog.find_by_name("Painting").expect("registered");

    let held = painting.lock();
    let (tx, rx) = mpsc::channel();
    thread::spawn({
        let engine = engine.clone();
        move || {
            let res = engine.submit_offer("Vase", 10.0, Bidder::new("Alice"));
            tx.send(res).expect("receiver alive");
        }
    });

    assert_eq!(
        rx.recv_timeout(Duration::from_secs(5))?,
        Ok(OfferResult::OfferAccepted)
    );
    drop(held);

    assert_eq!(engine.winning_bidders().len(), 1);
    Ok(())
}

#[test]
fn offers_on_the_same_item_wait_for_the_critical_section() -> Result<()> {
    let catalog = catalog_with([Item::new("Painting", "Art")])?;
    let engine = BiddingEngine::new(catalog.clone());
    let painting = catalog.find_by_name("Painting").expect("registered");

    let held = painting.lock();
    let (tx, rx) = mpsc::channel();
    let handle = thread::spawn({
        let engine = engine.clone();
        move || {
            let res = engine.submit_offer("Painting", 10.0, Bidder::new("Alice"));
            tx.send(res).expect("receiver alive");
        }
    });

    assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
    drop(held);

    assert_eq!(
        rx.recv_timeout(Duration::from_secs(5))?,
        Ok(OfferResult::OfferAccepted)
    );
    handle.join().expect("no panic");
    Ok(())
}

#[test]
fn winners_snapshot_does_not_freeze_the_catalog() -> Result<()> {
    let catalog = catalog_with([Item::new("Painting", "Art"), Item::new("Vase", "Antique")])?;
    let engine = BiddingEngine::new(catalog.clone());
    let painting = catalog.find_by_name("Painting").expect("registered");

    let held = painting.lock();
    let (tx, rx) = mpsc::channel();
    let snapshot = thread::spawn({
        let engine = engine.clone();
        move || {
            let winners = engine.winning_bidders();
            tx.send(()).expect("receiver alive");
            winners
        }
    });

    // the snapshot is stuck on Painting
    assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());

    catalog.register(Item::new("Guitar", "Music"))?;
    assert_eq!(
        engine.submit_offer("Vase", 30.0, Bidder::new("Bob"))?,
        OfferResult::OfferAccepted
    );
    assert!(rx.try_recv().is_err());

    drop(held);
    rx.recv_timeout(Duration::from_secs(5))?;
    let winners = snapshot.join().expect("no panic");

    assert_eq!(
        winners,
        BTreeMap::from([("Vase".to_owned(), "Bob".to_owned())])
    );
    assert_eq!(engine.list_items().len(), 3);
    Ok(())
}
