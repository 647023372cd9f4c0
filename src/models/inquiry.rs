use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};

/// Processing state of a contact inquiry
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum InquiryStatus {
    #[default]
    New,
    Contacted,
    InProgress,
    Closed,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum InquiryPriority {
    Low,
    #[default]
    Medium,
    High,
}

/// Scheduling state of a site visit
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum VisitStatus {
    #[default]
    Requested,
    Confirmed,
    Completed,
    Cancelled,
}

/// Contact inquiry about a property. Mutated by the external intake
/// workflow; this core only declares its index schema and shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inquiry {
    pub inquiry_id: String,

    pub property_id: String,

    pub user_name: String,

    pub user_email: Option<String>,

    pub user_phone: Option<String>,

    #[serde(default)]
    pub inquiry_type: Option<String>,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub preferred_contact_method: Option<String>,

    #[serde(default)]
    pub budget_range: Option<String>,

    #[serde(default)]
    pub move_in_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub additional_requirements: Option<String>,

    #[serde(default)]
    pub status: InquiryStatus,

    #[serde(default)]
    pub priority: InquiryPriority,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_details: Option<Value>,
}

/// Scheduled property viewing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteVisit {
    pub visit_id: String,

    pub property_id: String,

    pub user_name: String,

    pub user_email: Option<String>,

    pub user_phone: Option<String>,

    #[serde(default)]
    pub preferred_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub preferred_time: Option<String>,

    #[serde(default)]
    pub confirmed_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub confirmed_time: Option<String>,

    #[serde(default)]
    pub group_size: Option<u32>,

    #[serde(default)]
    pub special_requirements: Option<String>,

    #[serde(default)]
    pub status: VisitStatus,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_details: Option<Value>,
}
