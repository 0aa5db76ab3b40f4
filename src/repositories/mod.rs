pub mod assessment_repository;
pub mod control_repository;
pub mod evidence_repository;
pub mod finding_repository;
pub mod policy_repository;
pub mod snapshot_repository;

// Re-export all repositories for convenient access
pub use assessment_repository::AssessmentRepository;
pub use control_repository::ControlRepository;
pub use evidence_repository::EvidenceRepository;
pub use finding_repository::FindingRepository;
pub use policy_repository::PolicyRepository;
pub use snapshot_repository::SnapshotRepository;
