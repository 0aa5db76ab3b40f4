use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Control implementation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlStatus {
    NotImplemented,
    PartiallyImplemented,
    Implemented,
    NotApplicable,
}

impl ControlStatus {
    /// Convert from database string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "not_implemented" => Ok(ControlStatus::NotImplemented),
            "partially_implemented" => Ok(ControlStatus::PartiallyImplemented),
            "implemented" => Ok(ControlStatus::Implemented),
            "not_applicable" => Ok(ControlStatus::NotApplicable),
            _ => Err(format!("Invalid control status: {}", s)),
        }
    }

    /// Convert to database string
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlStatus::NotImplemented => "not_implemented",
            ControlStatus::PartiallyImplemented => "partially_implemented",
            ControlStatus::Implemented => "implemented",
            ControlStatus::NotApplicable => "not_applicable",
        }
    }
}

impl From<String> for ControlStatus {
    fn from(s: String) -> Self {
        Self::from_str(&s).unwrap_or(ControlStatus::NotImplemented)
    }
}

impl From<ControlStatus> for String {
    fn from(status: ControlStatus) -> Self {
        status.as_str().to_string()
    }
}

/// Control model representing a compliance control
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Control {
    pub id: Uuid,
    pub control_code: String, // Human-readable key, e.g. "AC-2"
    pub name: String,
    pub description: Option<String>,
    pub framework: String, // e.g. "SOC2", "ISO27001"
    pub status: String,    // Stored as TEXT, use ControlStatus enum for type safety
    pub policy_id: Option<Uuid>,
    pub owner: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Control {
    /// Create a new Control, not implemented by default
    pub fn new(
        control_code: String,
        name: String,
        description: Option<String>,
        framework: String,
        policy_id: Option<Uuid>,
        owner: Option<String>,
    ) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: Uuid::new_v4(),
            control_code,
            name,
            description,
            framework,
            status: ControlStatus::NotImplemented.as_str().to_string(),
            policy_id,
            owner,
            created_at: now,
            updated_at: now,
        }
    }

    /// Get status as an enum
    pub fn status_enum(&self) -> ControlStatus {
        ControlStatus::from_str(&self.status).unwrap_or(ControlStatus::NotImplemented)
    }

    /// Check if control counts toward the compliance rate numerator
    pub fn is_implemented(&self) -> bool {
        self.status_enum() == ControlStatus::Implemented
    }
}
