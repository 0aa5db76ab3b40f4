use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Policy lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyStatus {
    Draft,
    UnderReview,
    Published,
    Archived,
}

impl PolicyStatus {
    /// Convert from database string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(PolicyStatus::Draft),
            "under_review" => Ok(PolicyStatus::UnderReview),
            "published" => Ok(PolicyStatus::Published),
            "archived" => Ok(PolicyStatus::Archived),
            _ => Err(format!("Invalid policy status: {}", s)),
        }
    }

    /// Convert to database string
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyStatus::Draft => "draft",
            PolicyStatus::UnderReview => "under_review",
            PolicyStatus::Published => "published",
            PolicyStatus::Archived => "archived",
        }
    }
}

impl From<String> for PolicyStatus {
    fn from(s: String) -> Self {
        Self::from_str(&s).unwrap_or(PolicyStatus::Draft)
    }
}

impl From<PolicyStatus> for String {
    fn from(status: PolicyStatus) -> Self {
        status.as_str().to_string()
    }
}

/// Policy model representing a governance policy document
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub status: String, // Stored as TEXT, use PolicyStatus enum for type safety
    pub version: i32,
    pub owner: Option<String>,
    pub effective_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Policy {
    /// Create a new Policy in draft state
    pub fn new(
        title: String,
        description: Option<String>,
        category: String,
        owner: Option<String>,
        effective_date: Option<NaiveDate>,
    ) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            category,
            status: PolicyStatus::Draft.as_str().to_string(),
            version: 1,
            owner,
            effective_date,
            created_at: now,
            updated_at: now,
        }
    }

    /// Get status as an enum
    pub fn status_enum(&self) -> PolicyStatus {
        PolicyStatus::from_str(&self.status).unwrap_or(PolicyStatus::Draft)
    }

    /// Check if policy is published
    pub fn is_published(&self) -> bool {
        self.status_enum() == PolicyStatus::Published
    }

    /// Check if policy is awaiting review
    pub fn is_under_review(&self) -> bool {
        self.status_enum() == PolicyStatus::UnderReview
    }
}
