use crate::models::MetricSnapshot;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Expand a sparse, date-ascending snapshot series into a dense one with
/// exactly one entry per calendar day in `[start_date, end_date]`.
///
/// Days with a stored snapshot use it verbatim. Days without one repeat the
/// last known snapshot with the date rewritten (carry-forward); days before
/// any history exists get an all-zero placeholder. Implemented as a fold so
/// the carry state is explicit accumulator state rather than a captured
/// mutable variable.
pub fn fill_missing_snapshots(
    snapshots: &[MetricSnapshot],
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Vec<MetricSnapshot> {
    if end_date < start_date {
        return Vec::new();
    }

    let by_date: HashMap<NaiveDate, &MetricSnapshot> =
        snapshots.iter().map(|s| (s.snapshot_date, s)).collect();

    let day_count = (end_date - start_date).num_days() as usize + 1;

    let (filled, _last_known) = start_date
        .iter_days()
        .take_while(|day| *day <= end_date)
        .fold(
            (Vec::with_capacity(day_count), None::<MetricSnapshot>),
            |(mut filled, last_known), day| {
                let entry = match by_date.get(&day) {
                    Some(stored) => (*stored).clone(),
                    None => match &last_known {
                        Some(prev) => MetricSnapshot {
                            snapshot_date: day,
                            ..prev.clone()
                        },
                        None => MetricSnapshot::zero(day),
                    },
                };
                filled.push(entry.clone());
                (filled, Some(entry))
            },
        );

    filled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DashboardSummary;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    fn stored_snapshot(date: NaiveDate, open_findings: i64) -> MetricSnapshot {
        let summary = DashboardSummary {
            total_controls: 10,
            implemented_controls: 5,
            total_findings: open_findings + 1,
            open_findings,
            ..Default::default()
        };
        MetricSnapshot::from_summary(date, &summary)
    }

    #[test]
    fn test_output_covers_every_day() {
        let stored = vec![stored_snapshot(day(2), 4)];
        let filled = fill_missing_snapshots(&stored, day(1), day(7));
        assert_eq!(filled.len(), 7);
        for (i, snapshot) in filled.iter().enumerate() {
            assert_eq!(snapshot.snapshot_date, day(1 + i as u32));
        }
    }

    #[test]
    fn test_carry_forward_repeats_last_known() {
        let stored = vec![stored_snapshot(day(1), 4), stored_snapshot(day(5), 9)];
        let filled = fill_missing_snapshots(&stored, day(1), day(5));

        assert_eq!(filled.len(), 5);
        // Days 2-4 repeat day 1's values with only the date rewritten
        for snapshot in &filled[1..4] {
            assert_eq!(snapshot.open_findings, 4);
            assert_eq!(snapshot.compliance_rate, filled[0].compliance_rate);
        }
        assert_eq!(filled[1].snapshot_date, day(2));
        assert_eq!(filled[3].snapshot_date, day(4));
        // Day 5 uses its own stored row
        assert_eq!(filled[4].open_findings, 9);
    }

    #[test]
    fn test_zero_fill_before_any_history() {
        let filled = fill_missing_snapshots(&[], day(1), day(3));

        assert_eq!(filled.len(), 3);
        for snapshot in &filled {
            assert_eq!(snapshot.compliance_rate, 0.0);
            assert_eq!(snapshot.total_controls, 0);
            assert_eq!(snapshot.open_findings, 0);
        }
    }

    #[test]
    fn test_zero_fill_then_carry_forward() {
        let stored = vec![stored_snapshot(day(3), 2)];
        let filled = fill_missing_snapshots(&stored, day(1), day(5));

        // Before history: zeros. From day 3 on: stored values carried forward.
        assert_eq!(filled[0].total_controls, 0);
        assert_eq!(filled[1].total_controls, 0);
        assert_eq!(filled[2].open_findings, 2);
        assert_eq!(filled[3].open_findings, 2);
        assert_eq!(filled[4].open_findings, 2);
    }

    #[test]
    fn test_single_day_range() {
        let stored = vec![stored_snapshot(day(1), 1)];
        let filled = fill_missing_snapshots(&stored, day(1), day(1));
        assert_eq!(filled.len(), 1);
        assert_eq!(filled[0].open_findings, 1);
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let filled = fill_missing_snapshots(&[], day(5), day(1));
        assert!(filled.is_empty());
    }
}
