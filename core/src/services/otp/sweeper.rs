//! Periodic removal of expired challenges
//!
//! Expired records are already reclaimed lazily on the next verification for
//! their identifier. The sweeper bounds memory held by challenges nobody ever
//! verifies.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::info;

use super::service::OtpService;
use super::store::OtpStore;

/// Background task calling [`OtpService::purge_expired`] on an interval
pub struct ExpiredOtpSweeper<S: OtpStore + 'static> {
    service: Arc<OtpService<S>>,
    interval: Duration,
}

impl<S: OtpStore + 'static> ExpiredOtpSweeper<S> {
    pub fn new(service: Arc<OtpService<S>>, interval: Duration) -> Self {
        Self { service, interval }
    }

    /// Sweeper configured in whole seconds; `0` disables it
    pub fn from_secs(service: Arc<OtpService<S>>, interval_seconds: u64) -> Option<Self> {
        (interval_seconds > 0).then(|| Self::new(service, Duration::from_secs(interval_seconds)))
    }

    /// Run a single sweep
    pub fn run_once(&self) -> usize {
        self.service.purge_expired()
    }

    /// Spawn the sweep loop on the current tokio runtime
    pub fn spawn(self) -> JoinHandle<()> {
        info!(
            interval_seconds = self.interval.as_secs(),
            "Starting expired OTP sweeper"
        );
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                self.run_once();
            }
        })
    }
}
