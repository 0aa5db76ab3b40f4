use crate::services::TrendService;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::time;
use tracing::{error, info};

/// Background task that keeps today's metric snapshot fresh.
///
/// Trend queries already refresh the snapshot on demand; this loop makes
/// sure a day still gets its rollup even when nobody looks at the
/// dashboard.
pub struct SnapshotScheduler {
    trend_service: Arc<TrendService>,
    interval: Duration,
}

impl SnapshotScheduler {
    /// Create a new scheduler with the default hourly interval
    pub fn new(trend_service: Arc<TrendService>) -> Self {
        Self {
            trend_service,
            interval: Duration::from_secs(3600),
        }
    }

    /// Set refresh interval
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Start the refresh loop. A failed tick is logged and the loop keeps
    /// running; the next tick retries from scratch.
    pub async fn start(self) {
        let mut interval = time::interval(self.interval);
        info!(
            "Snapshot scheduler started, refreshing every {:?}",
            self.interval
        );

        loop {
            interval.tick().await;

            let today = Utc::now().date_naive();
            match self.trend_service.capture_snapshot(today).await {
                Ok(snapshot) => {
                    info!(
                        "Snapshot refreshed for {}: compliance {}%",
                        today, snapshot.compliance_rate
                    );
                }
                Err(e) => {
                    error!("Snapshot refresh failed for {}: {}", today, e);
                }
            }
        }
    }
}
