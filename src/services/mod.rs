pub mod assessment_service;
pub mod control_service;
pub mod dashboard_service;
pub mod evidence_service;
pub mod finding_service;
pub mod policy_service;
pub mod scheduler;
pub mod trend_service;

pub use assessment_service::AssessmentService;
pub use control_service::ControlService;
pub use dashboard_service::DashboardService;
pub use evidence_service::EvidenceService;
pub use finding_service::FindingService;
pub use policy_service::PolicyService;
pub use scheduler::SnapshotScheduler;
pub use trend_service::TrendService;
