use crate::error::AppResult;
use crate::models::MetricSnapshot;
use crate::repositories::SnapshotRepository;
use crate::services::DashboardService;
use crate::trend::{build_forecast, fill_missing_snapshots, TrendPoint, TrendResponse};
use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use std::sync::Arc;
use tracing::{debug, warn};

/// Default history window when the caller does not specify one
pub const DEFAULT_RANGE_DAYS: u32 = 30;
/// Smallest permitted history window
pub const MIN_RANGE_DAYS: u32 = 7;
/// Largest permitted history window
pub const MAX_RANGE_DAYS: u32 = 90;
/// Number of future days projected per trend query
pub const FORECAST_DAYS: u32 = 14;

/// Clamp a requested history window into the supported range
pub fn clamp_range_days(range_days: u32) -> u32 {
    range_days.clamp(MIN_RANGE_DAYS, MAX_RANGE_DAYS)
}

/// Service orchestrating the metric snapshot series and trend queries
pub struct TrendService {
    snapshot_repo: Arc<SnapshotRepository>,
    dashboard_service: Arc<DashboardService>,
}

impl TrendService {
    pub fn new(
        snapshot_repo: Arc<SnapshotRepository>,
        dashboard_service: Arc<DashboardService>,
    ) -> Self {
        Self {
            snapshot_repo,
            dashboard_service,
        }
    }

    /// Derive a snapshot for `date` from the live summary and upsert it by
    /// date. Errors propagate; the scheduler and tests observe real
    /// failures through this path.
    pub async fn capture_snapshot(&self, date: NaiveDate) -> AppResult<MetricSnapshot> {
        let summary = self.dashboard_service.compute_summary().await?;
        let snapshot = MetricSnapshot::from_summary(date, &summary);
        let stored = self.snapshot_repo.upsert(&snapshot).await?;

        debug!(
            "Captured metric snapshot for {}: compliance {}%, {} open findings",
            date, stored.compliance_rate, stored.open_findings
        );

        Ok(stored)
    }

    /// Best-effort snapshot refresh: failures are logged and swallowed so a
    /// trend query can still answer from whatever history is stored.
    async fn ensure_snapshot_for_date(&self, date: NaiveDate) {
        if let Err(e) = self.capture_snapshot(date).await {
            warn!("Failed to refresh metric snapshot for {}: {}", date, e);
        }
    }

    /// Compute the trend response over the last `range_days` days (clamped
    /// to [7, 90], default 30) plus a 14-day forecast.
    pub async fn get_trend(&self, range_days: Option<u32>) -> AppResult<TrendResponse> {
        let range_days = clamp_range_days(range_days.unwrap_or(DEFAULT_RANGE_DAYS));

        // Make sure today's rollup is present before reading the series
        let today = Utc::now().date_naive();
        self.ensure_snapshot_for_date(today).await;

        let start_date = today - Duration::days(range_days as i64 - 1);
        let stored = self.snapshot_repo.find_since(start_date).await?;

        let filled = fill_missing_snapshots(&stored, start_date, today);
        let history: Vec<TrendPoint> = filled.iter().map(TrendPoint::from_snapshot).collect();

        // Latest posture: last point of the filled history, else the most
        // recent stored snapshot, else an all-zero point for today
        let (latest_snapshot, last_updated_at) = match history.last() {
            Some(point) => (
                point.clone(),
                point.date.and_time(NaiveTime::MIN).and_utc(),
            ),
            None => match self.snapshot_repo.find_latest().await? {
                Some(snapshot) => {
                    let point = TrendPoint::from_snapshot(&snapshot);
                    let stamped_at = point.date.and_time(NaiveTime::MIN).and_utc();
                    (point, stamped_at)
                }
                None => (TrendPoint::zero(today), Utc::now()),
            },
        };

        let forecast = build_forecast(&filled, FORECAST_DAYS);

        Ok(TrendResponse {
            history,
            forecast,
            latest_snapshot,
            last_updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_days_clamped_low() {
        assert_eq!(clamp_range_days(1), 7);
        assert_eq!(clamp_range_days(6), 7);
    }

    #[test]
    fn test_range_days_clamped_high() {
        assert_eq!(clamp_range_days(91), 90);
        assert_eq!(clamp_range_days(365), 90);
    }

    #[test]
    fn test_range_days_within_bounds_unchanged() {
        assert_eq!(clamp_range_days(7), 7);
        assert_eq!(clamp_range_days(30), 30);
        assert_eq!(clamp_range_days(90), 90);
    }
}
