//! Contract tests for the snapshot trend engine: gap filling, trend
//! fitting, and forecast projection.

use chrono::NaiveDate;
use veritas_backend::models::{DashboardSummary, MetricSnapshot};
use veritas_backend::services::trend_service::clamp_range_days;
use veritas_backend::trend::{
    build_forecast, calculate_trend_coefficients, fill_missing_snapshots,
};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
}

fn snapshot(date: NaiveDate, compliance_rate: f64, open_findings: i32) -> MetricSnapshot {
    let mut snapshot = MetricSnapshot::zero(date);
    snapshot.compliance_rate = compliance_rate;
    snapshot.open_findings = open_findings;
    snapshot
}

// ============================================================================
// Range clamping
// ============================================================================

#[test]
fn test_range_days_clamped_into_supported_window() {
    assert_eq!(clamp_range_days(0), 7);
    assert_eq!(clamp_range_days(6), 7);
    assert_eq!(clamp_range_days(7), 7);
    assert_eq!(clamp_range_days(30), 30);
    assert_eq!(clamp_range_days(90), 90);
    assert_eq!(clamp_range_days(91), 90);
    assert_eq!(clamp_range_days(10_000), 90);
}

// ============================================================================
// Gap filling
// ============================================================================

#[test]
fn test_fill_output_length_matches_day_count() {
    for (start, end, expected) in [(1u32, 1u32, 1usize), (1, 7, 7), (1, 30, 30)] {
        let filled = fill_missing_snapshots(&[], day(start), day(end));
        assert_eq!(filled.len(), expected);
    }
}

#[test]
fn test_fill_carry_forward_between_stored_days() {
    // Stored snapshots only on day 1 and day 5 of a 5-day range: days 2-4
    // must repeat day 1's values with the date rewritten.
    let stored = vec![snapshot(day(1), 60.0, 8), snapshot(day(5), 70.0, 4)];
    let filled = fill_missing_snapshots(&stored, day(1), day(5));

    assert_eq!(filled.len(), 5);
    for (i, entry) in filled.iter().enumerate() {
        assert_eq!(entry.snapshot_date, day(1 + i as u32));
    }
    for entry in &filled[1..4] {
        assert_eq!(entry.compliance_rate, 60.0);
        assert_eq!(entry.open_findings, 8);
    }
    assert_eq!(filled[4].compliance_rate, 70.0);
    assert_eq!(filled[4].open_findings, 4);
}

#[test]
fn test_fill_zero_fills_when_no_history_exists() {
    let filled = fill_missing_snapshots(&[], day(10), day(16));

    assert_eq!(filled.len(), 7);
    for entry in &filled {
        assert_eq!(entry.compliance_rate, 0.0);
        assert_eq!(entry.implemented_controls, 0);
        assert_eq!(entry.total_controls, 0);
        assert_eq!(entry.open_findings, 0);
        assert_eq!(entry.critical_findings, 0);
    }
}

#[test]
fn test_fill_sorted_ascending_without_gaps() {
    let stored = vec![snapshot(day(3), 50.0, 2), snapshot(day(9), 55.0, 1)];
    let filled = fill_missing_snapshots(&stored, day(1), day(12));

    assert_eq!(filled.len(), 12);
    for window in filled.windows(2) {
        assert_eq!(
            window[1].snapshot_date,
            window[0].snapshot_date + chrono::Duration::days(1)
        );
    }
}

// ============================================================================
// Trend coefficients
// ============================================================================

#[test]
fn test_coefficients_empty_series() {
    let fit = calculate_trend_coefficients(&[]);
    assert_eq!(fit.slope, 0.0);
    assert_eq!(fit.intercept, 0.0);
}

#[test]
fn test_coefficients_single_value() {
    let fit = calculate_trend_coefficients(&[42.0]);
    assert_eq!(fit.slope, 0.0);
    assert_eq!(fit.intercept, 42.0);
}

#[test]
fn test_coefficients_recover_exact_line() {
    let fit = calculate_trend_coefficients(&[10.0, 20.0, 30.0]);
    assert!((fit.slope - 10.0).abs() < 1e-9);
    assert!((fit.intercept - 10.0).abs() < 1e-9);
}

// ============================================================================
// Forecast projection
// ============================================================================

#[test]
fn test_forecast_empty_series_is_empty() {
    assert!(build_forecast(&[], 14).is_empty());
}

#[test]
fn test_forecast_compliance_always_within_bounds() {
    let rising: Vec<MetricSnapshot> = (1..=10)
        .map(|d| snapshot(day(d), 80.0 + d as f64 * 2.0, 0))
        .collect();
    let falling: Vec<MetricSnapshot> = (1..=10)
        .map(|d| snapshot(day(d), 20.0 - d as f64 * 2.0, 0))
        .collect();

    for series in [rising, falling] {
        for point in build_forecast(&series, 14) {
            assert!(point.projected_compliance_rate >= 0.0);
            assert!(point.projected_compliance_rate <= 100.0);
        }
    }
}

#[test]
fn test_forecast_findings_never_negative() {
    let series: Vec<MetricSnapshot> = (1..=10)
        .map(|d| snapshot(day(d), 50.0, 20 - d as i32 * 2))
        .collect();

    for point in build_forecast(&series, 14) {
        assert!(point.projected_open_findings >= 0);
    }
}

#[test]
fn test_forecast_reflects_fitted_slope_after_sharp_drop() {
    // 13 days of 10 open findings, then a drop to 0 on day 14. The next
    // projected day must follow the fitted line (7), not repeat the 0.
    let mut series: Vec<MetricSnapshot> = (1..=13)
        .map(|d| snapshot(day(d), 80.0, 10))
        .collect();
    series.push(snapshot(day(14), 80.0, 0));

    let forecast = build_forecast(&series, 14);
    assert_eq!(forecast.len(), 14);
    assert_eq!(forecast[0].projected_open_findings, 7);
}

#[test]
fn test_forecast_dates_continue_from_last_snapshot() {
    let series = vec![snapshot(day(1), 50.0, 3), snapshot(day(2), 51.0, 3)];
    let forecast = build_forecast(&series, 3);

    assert_eq!(forecast[0].date, day(3));
    assert_eq!(forecast[1].date, day(4));
    assert_eq!(forecast[2].date, day(5));
}

// ============================================================================
// Snapshot derivation idempotence
// ============================================================================

#[test]
fn test_repeated_derivation_yields_identical_rates() {
    let summary = DashboardSummary {
        total_controls: 48,
        implemented_controls: 31,
        total_assessments: 6,
        completed_assessments: 2,
        total_findings: 9,
        open_findings: 4,
        critical_findings: 1,
        approved_evidence: 17,
        policies_under_review: 2,
    };

    let first = MetricSnapshot::from_summary(day(1), &summary);
    let second = MetricSnapshot::from_summary(day(1), &summary);

    assert_eq!(first.compliance_rate, second.compliance_rate);
    assert_eq!(first.assessment_completion_rate, second.assessment_completion_rate);
    assert_eq!(first.risk_closure_rate, second.risk_closure_rate);
    assert_eq!(first.implemented_controls, second.implemented_controls);
    assert_eq!(first.open_findings, second.open_findings);
    assert_eq!(
        first.metadata["policiesUnderReview"],
        second.metadata["policiesUnderReview"]
    );
}
