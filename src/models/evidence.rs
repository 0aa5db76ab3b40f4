use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Evidence review status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceStatus {
    Pending,
    Approved,
    Rejected,
}

impl EvidenceStatus {
    /// Convert from database string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(EvidenceStatus::Pending),
            "approved" => Ok(EvidenceStatus::Approved),
            "rejected" => Ok(EvidenceStatus::Rejected),
            _ => Err(format!("Invalid evidence status: {}", s)),
        }
    }

    /// Convert to database string
    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceStatus::Pending => "pending",
            EvidenceStatus::Approved => "approved",
            EvidenceStatus::Rejected => "rejected",
        }
    }
}

impl From<String> for EvidenceStatus {
    fn from(s: String) -> Self {
        Self::from_str(&s).unwrap_or(EvidenceStatus::Pending)
    }
}

impl From<EvidenceStatus> for String {
    fn from(status: EvidenceStatus) -> Self {
        status.as_str().to_string()
    }
}

/// Evidence model representing a submitted proof artifact for a control.
/// The artifact itself lives outside this service; only an opaque
/// reference string is kept here.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Evidence {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub control_id: Option<Uuid>,
    pub reference: Option<String>,
    pub status: String, // Stored as TEXT, use EvidenceStatus enum for type safety
    pub reviewer: Option<String>,
    pub reviewed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Evidence {
    /// Create a new Evidence record pending review
    pub fn new(
        name: String,
        description: Option<String>,
        control_id: Option<Uuid>,
        reference: Option<String>,
    ) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            control_id,
            reference,
            status: EvidenceStatus::Pending.as_str().to_string(),
            reviewer: None,
            reviewed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Get status as an enum
    pub fn status_enum(&self) -> EvidenceStatus {
        EvidenceStatus::from_str(&self.status).unwrap_or(EvidenceStatus::Pending)
    }

    /// Check if evidence has been approved
    pub fn is_approved(&self) -> bool {
        self.status_enum() == EvidenceStatus::Approved
    }
}
