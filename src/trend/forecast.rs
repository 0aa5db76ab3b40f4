use crate::models::MetricSnapshot;
use crate::trend::linear::calculate_trend_coefficients;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Trailing window size the projection is fitted over. Extrapolating only
/// the recent window keeps the forecast responsive to trend changes.
pub const FORECAST_WINDOW_DAYS: usize = 14;

/// One projected future day of compliance posture
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub projected_compliance_rate: f64,
    pub projected_open_findings: i64,
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Project the compliance rate and open-findings count `days_forward` days
/// past the end of the series.
///
/// Separate lines are fitted over the trailing window (at most
/// [`FORECAST_WINDOW_DAYS`] entries) for each metric, then evaluated at
/// `window.len() - 1 + d` — the projection continues the regression line
/// from the last point in the window. The compliance rate is clamped into
/// [0, 100]; open findings never go negative.
pub fn build_forecast(snapshots: &[MetricSnapshot], days_forward: u32) -> Vec<ForecastPoint> {
    let last = match snapshots.last() {
        Some(last) => last,
        None => return Vec::new(),
    };

    let window_len = snapshots.len().min(FORECAST_WINDOW_DAYS);
    let window = &snapshots[snapshots.len() - window_len..];

    let compliance_values: Vec<f64> = window.iter().map(|s| s.compliance_rate).collect();
    let findings_values: Vec<f64> = window.iter().map(|s| s.open_findings as f64).collect();

    let compliance_fit = calculate_trend_coefficients(&compliance_values);
    let findings_fit = calculate_trend_coefficients(&findings_values);

    (1..=days_forward)
        .map(|day| {
            let index = (window.len() - 1) as f64 + day as f64;

            let projected_rate = compliance_fit.value_at(index).clamp(0.0, 100.0);
            let projected_findings = findings_fit.value_at(index).round().max(0.0);

            ForecastPoint {
                date: last.snapshot_date + Duration::days(day as i64),
                projected_compliance_rate: round_to_tenth(projected_rate),
                projected_open_findings: projected_findings as i64,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    fn snapshot_with(date: NaiveDate, compliance_rate: f64, open_findings: i32) -> MetricSnapshot {
        let mut snapshot = MetricSnapshot::zero(date);
        snapshot.compliance_rate = compliance_rate;
        snapshot.open_findings = open_findings;
        snapshot
    }

    #[test]
    fn test_empty_series_yields_empty_forecast() {
        assert!(build_forecast(&[], 14).is_empty());
    }

    #[test]
    fn test_forecast_length_and_dates() {
        let series: Vec<MetricSnapshot> = (1..=5)
            .map(|d| snapshot_with(day(d), 50.0, 3))
            .collect();
        let forecast = build_forecast(&series, 14);

        assert_eq!(forecast.len(), 14);
        assert_eq!(forecast[0].date, day(6));
        assert_eq!(forecast[13].date, day(19));
    }

    #[test]
    fn test_compliance_rate_clamped_to_valid_range() {
        // Steep upward trend overshoots 100 immediately
        let series = vec![
            snapshot_with(day(1), 90.0, 0),
            snapshot_with(day(2), 95.0, 0),
            snapshot_with(day(3), 100.0, 0),
        ];
        let forecast = build_forecast(&series, 5);

        for point in &forecast {
            assert!(point.projected_compliance_rate <= 100.0);
            assert!(point.projected_compliance_rate >= 0.0);
        }
        assert_eq!(forecast[0].projected_compliance_rate, 100.0);
    }

    #[test]
    fn test_open_findings_never_negative() {
        let series = vec![
            snapshot_with(day(1), 50.0, 2),
            snapshot_with(day(2), 50.0, 1),
            snapshot_with(day(3), 50.0, 0),
        ];
        let forecast = build_forecast(&series, 5);

        for point in &forecast {
            assert!(point.projected_open_findings >= 0);
        }
        assert_eq!(forecast[0].projected_open_findings, 0);
    }

    #[test]
    fn test_sharp_drop_follows_fitted_slope() {
        // 13 days at 10 open findings, then a drop to 0: the projection
        // reflects the fitted slope, not a repeat of the last value.
        let mut series: Vec<MetricSnapshot> = (1..=13)
            .map(|d| snapshot_with(day(d), 80.0, 10))
            .collect();
        series.push(snapshot_with(day(14), 80.0, 0));

        let forecast = build_forecast(&series, 1);
        assert_eq!(forecast.len(), 1);
        // OLS over [10 x13, 0]: intercept 78/7, slope -2/7; index 14 -> 50/7 -> 7
        assert_eq!(forecast[0].projected_open_findings, 7);
        assert_eq!(forecast[0].date, day(15));
    }

    #[test]
    fn test_window_limited_to_trailing_fourteen() {
        // 20 flat days at 40.0 followed by nothing: older values beyond the
        // window must not influence the fit. Make the first 6 days extreme
        // to prove they are excluded.
        let mut series: Vec<MetricSnapshot> = (1..=6)
            .map(|d| snapshot_with(day(d), 0.0, 100))
            .collect();
        series.extend((7..=20).map(|d| snapshot_with(day(d), 40.0, 5)));

        let forecast = build_forecast(&series, 3);
        for point in &forecast {
            assert_eq!(point.projected_compliance_rate, 40.0);
            assert_eq!(point.projected_open_findings, 5);
        }
    }

    #[test]
    fn test_projection_rounded_to_one_decimal() {
        let series = vec![
            snapshot_with(day(1), 33.3, 0),
            snapshot_with(day(2), 33.4, 0),
        ];
        let forecast = build_forecast(&series, 1);
        assert_eq!(forecast[0].projected_compliance_rate, 33.5);
    }
}
