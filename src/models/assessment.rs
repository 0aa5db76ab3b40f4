use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Assessment progress status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStatus {
    Planned,
    InProgress,
    Completed,
    Cancelled,
}

impl AssessmentStatus {
    /// Convert from database string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "planned" => Ok(AssessmentStatus::Planned),
            "in_progress" => Ok(AssessmentStatus::InProgress),
            "completed" => Ok(AssessmentStatus::Completed),
            "cancelled" => Ok(AssessmentStatus::Cancelled),
            _ => Err(format!("Invalid assessment status: {}", s)),
        }
    }

    /// Convert to database string
    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentStatus::Planned => "planned",
            AssessmentStatus::InProgress => "in_progress",
            AssessmentStatus::Completed => "completed",
            AssessmentStatus::Cancelled => "cancelled",
        }
    }
}

impl From<String> for AssessmentStatus {
    fn from(s: String) -> Self {
        Self::from_str(&s).unwrap_or(AssessmentStatus::Planned)
    }
}

impl From<AssessmentStatus> for String {
    fn from(status: AssessmentStatus) -> Self {
        status.as_str().to_string()
    }
}

/// Assessment model representing a compliance assessment campaign
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub scope: Option<String>,
    pub status: String, // Stored as TEXT, use AssessmentStatus enum for type safety
    pub due_date: Option<NaiveDate>,
    pub completed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Assessment {
    /// Create a new Assessment in planned state
    pub fn new(
        name: String,
        description: Option<String>,
        scope: Option<String>,
        due_date: Option<NaiveDate>,
    ) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            scope,
            status: AssessmentStatus::Planned.as_str().to_string(),
            due_date,
            completed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Get status as an enum
    pub fn status_enum(&self) -> AssessmentStatus {
        AssessmentStatus::from_str(&self.status).unwrap_or(AssessmentStatus::Planned)
    }

    /// Check if assessment is completed
    pub fn is_completed(&self) -> bool {
        self.status_enum() == AssessmentStatus::Completed
    }
}
