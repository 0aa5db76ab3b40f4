use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Finding severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FindingSeverity {
    /// Convert from database string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "low" => Ok(FindingSeverity::Low),
            "medium" => Ok(FindingSeverity::Medium),
            "high" => Ok(FindingSeverity::High),
            "critical" => Ok(FindingSeverity::Critical),
            _ => Err(format!("Invalid finding severity: {}", s)),
        }
    }

    /// Convert to database string
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingSeverity::Low => "low",
            FindingSeverity::Medium => "medium",
            FindingSeverity::High => "high",
            FindingSeverity::Critical => "critical",
        }
    }
}

impl From<String> for FindingSeverity {
    fn from(s: String) -> Self {
        Self::from_str(&s).unwrap_or(FindingSeverity::Low)
    }
}

impl From<FindingSeverity> for String {
    fn from(severity: FindingSeverity) -> Self {
        severity.as_str().to_string()
    }
}

/// Finding remediation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingStatus {
    Open,
    InRemediation,
    Closed,
}

impl FindingStatus {
    /// Convert from database string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "open" => Ok(FindingStatus::Open),
            "in_remediation" => Ok(FindingStatus::InRemediation),
            "closed" => Ok(FindingStatus::Closed),
            _ => Err(format!("Invalid finding status: {}", s)),
        }
    }

    /// Convert to database string
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingStatus::Open => "open",
            FindingStatus::InRemediation => "in_remediation",
            FindingStatus::Closed => "closed",
        }
    }
}

impl From<String> for FindingStatus {
    fn from(s: String) -> Self {
        Self::from_str(&s).unwrap_or(FindingStatus::Open)
    }
}

impl From<FindingStatus> for String {
    fn from(status: FindingStatus) -> Self {
        status.as_str().to_string()
    }
}

/// Finding model representing an identified compliance gap
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub severity: String, // Stored as TEXT, use FindingSeverity enum for type safety
    pub status: String,   // Stored as TEXT, use FindingStatus enum for type safety
    pub assessment_id: Option<Uuid>,
    pub control_id: Option<Uuid>,
    pub due_date: Option<NaiveDate>,
    pub resolved_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Finding {
    /// Create a new open Finding
    pub fn new(
        title: String,
        description: Option<String>,
        severity: FindingSeverity,
        assessment_id: Option<Uuid>,
        control_id: Option<Uuid>,
        due_date: Option<NaiveDate>,
    ) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            severity: severity.as_str().to_string(),
            status: FindingStatus::Open.as_str().to_string(),
            assessment_id,
            control_id,
            due_date,
            resolved_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Get severity as an enum
    pub fn severity_enum(&self) -> FindingSeverity {
        FindingSeverity::from_str(&self.severity).unwrap_or(FindingSeverity::Low)
    }

    /// Get status as an enum
    pub fn status_enum(&self) -> FindingStatus {
        FindingStatus::from_str(&self.status).unwrap_or(FindingStatus::Open)
    }

    /// Check if finding still counts as open (not closed)
    pub fn is_open(&self) -> bool {
        self.status_enum() != FindingStatus::Closed
    }

    /// Check if finding is critical severity
    pub fn is_critical(&self) -> bool {
        self.severity_enum() == FindingSeverity::Critical
    }
}
