use chrono::NaiveDate;
use veritas_backend::models::*;
use veritas_backend::trend::TrendPoint;

// ============================================================================
// Status/severity string conversions
// ============================================================================

#[test]
fn test_policy_status_conversion() {
    assert_eq!(PolicyStatus::Draft.as_str(), "draft");
    assert_eq!(PolicyStatus::UnderReview.as_str(), "under_review");
    assert_eq!(PolicyStatus::Published.as_str(), "published");
    assert_eq!(PolicyStatus::Archived.as_str(), "archived");

    assert_eq!(
        PolicyStatus::from_str("under_review").unwrap(),
        PolicyStatus::UnderReview
    );
    assert!(PolicyStatus::from_str("bogus").is_err());
    // Unknown strings from the database fall back to draft
    assert_eq!(PolicyStatus::from("bogus".to_string()), PolicyStatus::Draft);
}

#[test]
fn test_control_status_conversion() {
    assert_eq!(ControlStatus::NotImplemented.as_str(), "not_implemented");
    assert_eq!(
        ControlStatus::PartiallyImplemented.as_str(),
        "partially_implemented"
    );
    assert_eq!(ControlStatus::Implemented.as_str(), "implemented");
    assert_eq!(ControlStatus::NotApplicable.as_str(), "not_applicable");

    assert_eq!(
        ControlStatus::from_str("implemented").unwrap(),
        ControlStatus::Implemented
    );
    assert!(ControlStatus::from_str("done").is_err());
}

#[test]
fn test_assessment_status_conversion() {
    assert_eq!(AssessmentStatus::Planned.as_str(), "planned");
    assert_eq!(AssessmentStatus::InProgress.as_str(), "in_progress");
    assert_eq!(AssessmentStatus::Completed.as_str(), "completed");
    assert_eq!(AssessmentStatus::Cancelled.as_str(), "cancelled");

    assert_eq!(
        AssessmentStatus::from_str("COMPLETED").unwrap(),
        AssessmentStatus::Completed
    );
}

#[test]
fn test_finding_severity_conversion() {
    assert_eq!(FindingSeverity::Low.as_str(), "low");
    assert_eq!(FindingSeverity::Critical.as_str(), "critical");

    assert_eq!(
        FindingSeverity::from_str("critical").unwrap(),
        FindingSeverity::Critical
    );
    assert!(FindingSeverity::from_str("severe").is_err());
}

#[test]
fn test_finding_status_conversion() {
    assert_eq!(FindingStatus::Open.as_str(), "open");
    assert_eq!(FindingStatus::InRemediation.as_str(), "in_remediation");
    assert_eq!(FindingStatus::Closed.as_str(), "closed");

    assert_eq!(
        FindingStatus::from_str("in_remediation").unwrap(),
        FindingStatus::InRemediation
    );
}

#[test]
fn test_evidence_status_conversion() {
    assert_eq!(EvidenceStatus::Pending.as_str(), "pending");
    assert_eq!(EvidenceStatus::Approved.as_str(), "approved");
    assert_eq!(EvidenceStatus::Rejected.as_str(), "rejected");

    assert_eq!(
        EvidenceStatus::from_str("approved").unwrap(),
        EvidenceStatus::Approved
    );
}

// ============================================================================
// Model constructors
// ============================================================================

#[test]
fn test_new_policy_defaults() {
    let policy = Policy::new(
        "Access Control Policy".to_string(),
        None,
        "security".to_string(),
        None,
        None,
    );

    assert_eq!(policy.status_enum(), PolicyStatus::Draft);
    assert_eq!(policy.version, 1);
    assert!(!policy.is_published());
}

#[test]
fn test_new_control_defaults() {
    let control = Control::new(
        "AC-2".to_string(),
        "Account Management".to_string(),
        None,
        "SOC2".to_string(),
        None,
        None,
    );

    assert_eq!(control.status_enum(), ControlStatus::NotImplemented);
    assert!(!control.is_implemented());
}

#[test]
fn test_new_assessment_defaults() {
    let assessment = Assessment::new("Q2 SOC2 Review".to_string(), None, None, None);

    assert_eq!(assessment.status_enum(), AssessmentStatus::Planned);
    assert!(assessment.completed_at.is_none());
    assert!(!assessment.is_completed());
}

#[test]
fn test_new_finding_defaults() {
    let finding = Finding::new(
        "MFA not enforced".to_string(),
        None,
        FindingSeverity::High,
        None,
        None,
        None,
    );

    assert_eq!(finding.status_enum(), FindingStatus::Open);
    assert!(finding.is_open());
    assert!(finding.resolved_at.is_none());
    assert!(!finding.is_critical());
}

#[test]
fn test_finding_in_remediation_counts_as_open() {
    let mut finding = Finding::new(
        "Stale accounts".to_string(),
        None,
        FindingSeverity::Medium,
        None,
        None,
        None,
    );
    finding.status = FindingStatus::InRemediation.as_str().to_string();
    assert!(finding.is_open());

    finding.status = FindingStatus::Closed.as_str().to_string();
    assert!(!finding.is_open());
}

#[test]
fn test_new_evidence_defaults() {
    let evidence = Evidence::new("Firewall config export".to_string(), None, None, None);

    assert_eq!(evidence.status_enum(), EvidenceStatus::Pending);
    assert!(!evidence.is_approved());
    assert!(evidence.reviewer.is_none());
}

// ============================================================================
// Snapshot derivation
// ============================================================================

#[test]
fn test_snapshot_rates_worked_example() {
    // 75/100 controls, 5/20 findings open, 8/10 assessments completed
    let summary = DashboardSummary {
        total_controls: 100,
        implemented_controls: 75,
        total_findings: 20,
        open_findings: 5,
        total_assessments: 10,
        completed_assessments: 8,
        ..Default::default()
    };

    let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    let snapshot = MetricSnapshot::from_summary(date, &summary);

    assert_eq!(snapshot.compliance_rate, 75.0);
    assert_eq!(snapshot.risk_closure_rate, 75.0);
    assert_eq!(snapshot.assessment_completion_rate, 80.0);
}

#[test]
fn test_snapshot_rates_never_divide_by_zero() {
    let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    let snapshot = MetricSnapshot::from_summary(date, &DashboardSummary::default());

    assert_eq!(snapshot.compliance_rate, 0.0);
    assert_eq!(snapshot.assessment_completion_rate, 0.0);
    assert_eq!(snapshot.risk_closure_rate, 0.0);
}

#[test]
fn test_trend_point_projection() {
    let summary = DashboardSummary {
        total_controls: 10,
        implemented_controls: 4,
        total_findings: 3,
        open_findings: 2,
        ..Default::default()
    };
    let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    let snapshot = MetricSnapshot::from_summary(date, &summary);

    let point = TrendPoint::from_snapshot(&snapshot);
    assert_eq!(point.date, date);
    assert_eq!(point.compliance_rate, 40.0);
    assert_eq!(point.implemented_controls, 4);
    assert_eq!(point.total_controls, 10);
    assert_eq!(point.open_findings, 2);

    let zero = TrendPoint::zero(date);
    assert_eq!(zero.compliance_rate, 0.0);
    assert_eq!(zero.total_controls, 0);
}
