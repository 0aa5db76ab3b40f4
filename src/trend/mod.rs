//! Metric snapshot trend engine.
//!
//! Pure computation over the daily snapshot series: gap filling,
//! least-squares trend fitting, and forward projection. All functions here
//! are synchronous and side-effect free; persistence lives in the
//! repositories and orchestration in `TrendService`.

pub mod fill;
pub mod forecast;
pub mod linear;

pub use fill::fill_missing_snapshots;
pub use forecast::{build_forecast, ForecastPoint, FORECAST_WINDOW_DAYS};
pub use linear::{calculate_trend_coefficients, TrendCoefficients};

use crate::models::MetricSnapshot;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One day of trend history, projected from a stored (or synthesized)
/// snapshot onto the shape the dashboard consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub compliance_rate: f64,
    pub implemented_controls: i32,
    pub total_controls: i32,
    pub open_findings: i32,
    pub assessment_completion_rate: f64,
    pub risk_closure_rate: f64,
}

impl TrendPoint {
    /// Project a snapshot onto the trend-point shape
    pub fn from_snapshot(snapshot: &MetricSnapshot) -> Self {
        Self {
            date: snapshot.snapshot_date,
            compliance_rate: snapshot.compliance_rate,
            implemented_controls: snapshot.implemented_controls,
            total_controls: snapshot.total_controls,
            open_findings: snapshot.open_findings,
            assessment_completion_rate: snapshot.assessment_completion_rate,
            risk_closure_rate: snapshot.risk_closure_rate,
        }
    }

    /// All-zero point for when no snapshot exists at all
    pub fn zero(date: NaiveDate) -> Self {
        Self {
            date,
            compliance_rate: 0.0,
            implemented_controls: 0,
            total_controls: 0,
            open_findings: 0,
            assessment_completion_rate: 0.0,
            risk_closure_rate: 0.0,
        }
    }
}

/// The public result of a trend query: dense history, forward projection,
/// and the latest known posture.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendResponse {
    pub history: Vec<TrendPoint>,
    pub forecast: Vec<ForecastPoint>,
    pub latest_snapshot: TrendPoint,
    pub last_updated_at: DateTime<Utc>,
}
