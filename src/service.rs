pub mod bidder;
pub mod bidding_engine;
pub mod reporter;

pub use self::{bidder::*, bidding_engine::*, reporter::*};
use anyhow::{bail, format_err, Result};
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
    time::{Duration, Instant},
};
use tracing::{error, info};

pub type ServiceId = String;

/// A service that is a loop that does something
pub trait LoopService: Send {
    fn get_service_id(&self) -> ServiceId;

    fn run_iteration(&mut self) -> Result<()>;
}

/// Service execution control instance
///
/// All services are basically a loop, and we would like to be able to
/// gracefully terminate them, and handle any top-level error of any
/// of them by gracefully stopping everything else.
#[derive(Clone, Default)]
pub struct ServiceControl {
    stop_all: Arc<AtomicBool>,
}

impl ServiceControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop_all(&self) {
        self.stop_all.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.stop_all.load(Ordering::SeqCst)
    }

    /// Block until something calls [`Self::stop_all`] or `limit` elapses
    pub fn wait(&self, limit: Option<Duration>) {
        let start = Instant::now();
        while !self.is_stopped() {
            if limit.map(|limit| limit <= start.elapsed()).unwrap_or(false) {
                return;
            }
            thread::sleep(Duration::from_millis(50));
        }
    }

    /// Start a new service as a loop
    ///
    /// This will take care of checking termination condition and
    /// handling any errors returned by the service
    pub fn spawn_loop(&self, mut service: impl LoopService + 'static) -> JoinHandle {
        let stop = Arc::new(AtomicBool::new(false));
        let service_id = service.get_service_id();

        JoinHandle::new(
            service_id.clone(),
            stop.clone(),
            thread::spawn({
                let stop_all = self.stop_all.clone();
                move || {
                    info!(service = %service_id, "service started");
                    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                        while !stop.load(Ordering::SeqCst) && !stop_all.load(Ordering::SeqCst) {
                            if let Err(e) = service.run_iteration() {
                                error!(service = %service_id, error = %e, "service failed");
                                stop_all.store(true, Ordering::SeqCst);
                                return Err(e);
                            }
                        }
                        Ok(())
                    })) {
                        Err(_e) => {
                            error!(service = %service_id, "service panicked");
                            stop_all.store(true, Ordering::SeqCst);
                            bail!("service {service_id} panicked");
                        }
                        Ok(res) => {
                            info!(service = %service_id, "service stopped");
                            res
                        }
                    }
                }
            }),
        )
    }
}

/// Simple thread join wrapper that joins the thread on drop
pub struct JoinHandle {
    service_id: ServiceId,
    stop: Arc<AtomicBool>,
    thread: Option<thread::JoinHandle<Result<()>>>,
}

impl JoinHandle {
    fn new(
        service_id: ServiceId,
        stop: Arc<AtomicBool>,
        handle: thread::JoinHandle<Result<()>>,
    ) -> Self {
        JoinHandle {
            service_id,
            stop,
            thread: Some(handle),
        }
    }

    fn join_mut(&mut self) -> Result<()> {
        if let Some(h) = self.thread.take() {
            h.join()
                .map_err(|e| format_err!("join of {} failed: {:?}", self.service_id, e))?
        } else {
            Ok(())
        }
    }

    pub fn join(mut self) -> Result<()> {
        self.join_mut()
    }
}

impl Drop for JoinHandle {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Err(e) = self.join_mut() {
            error!(service = %self.service_id, error = %e, "service ended with an error");
        }
    }
}
