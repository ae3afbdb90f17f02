//! Periodic status checking.
//!
//! # Responsibilities
//! - Run the degraded check on a fixed interval
//! - Publish the latest verdict to subscribers
//! - Stop on shutdown signal

use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tokio::time;

use crate::status::checker::HealthChecker;
use crate::status::decision::StatusReport;

pub struct StatusMonitor {
    checker: HealthChecker,
    interval: Duration,
    reports: watch::Sender<Option<StatusReport>>,
}

impl StatusMonitor {
    pub fn new(checker: HealthChecker, interval: Duration) -> Self {
        let (reports, _) = watch::channel(None);
        Self {
            checker,
            interval,
            reports,
        }
    }

    /// Receiver of the latest report; `None` until the first check finishes.
    pub fn subscribe(&self) -> watch::Receiver<Option<StatusReport>> {
        self.reports.subscribe()
    }

    /// Check until shutdown. Returns the number of checks run.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) -> u64 {
        tracing::info!(
            interval_secs = self.interval.as_secs_f64(),
            "Status monitor starting"
        );

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(time::MissedTickBehavior::Delay);
        let mut checks = 0u64;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let status = self.checker.is_degraded().await;
                    checks += 1;
                    self.reports.send_replace(Some(status.report()));
                }
                _ = shutdown.recv() => {
                    tracing::info!(checks, "Status monitor received shutdown signal, exiting loop");
                    break;
                }
            }
        }

        checks
    }
}
