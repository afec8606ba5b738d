//! Resource records served under the role-scoped namespaces.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::serde_helper::{decimal, optional_decimal};

// =========================================================
// Statistics
// =========================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_messages: u64,
    pub pending_messages: u64,
    pub completed_messages: u64,
    pub total_users: u64,
    pub total_departments: u64,
    pub total_requests: u64,
    pub pending_requests: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsByDepartment {
    pub department_id: i64,
    pub department_name: String,
    pub total_messages: u64,
    pub completed_messages: u64,
    pub pending_messages: u64,
    pub total_staff: u64,
}

// =========================================================
// Routing configuration
// =========================================================

/// Keyword routing rule: messages matching `keyword` go to `department_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub id: i64,
    pub keyword: String,
    pub department_id: i64,
    pub priority: i32,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub department_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpi {
    pub id: i64,
    pub user_id: i64,
    pub metric_name: String,
    #[serde(default, deserialize_with = "optional_decimal")]
    pub target_value: Option<f64>,
    #[serde(deserialize_with = "decimal")]
    pub current_value: f64,
    #[serde(default)]
    pub period_start: Option<NaiveDate>,
    #[serde(default)]
    pub period_end: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
}

impl Kpi {
    /// Progress towards the target as a fraction, when a non-zero target is set.
    pub fn progress(&self) -> Option<f64> {
        self.target_value
            .filter(|target| *target != 0.0)
            .map(|target| self.current_value / target)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    pub id: i64,
    pub name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub department_id: i64,
    pub created_at: NaiveDateTime,
}

// =========================================================
// Messages
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageDirection {
    Incoming,
    Outgoing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageStatus {
    Pending,
    Assigned,
    InProgress,
    Completed,
}

impl MessageStatus {
    pub fn label(&self) -> &'static str {
        match self {
            MessageStatus::Pending => "Pending",
            MessageStatus::Assigned => "Assigned",
            MessageStatus::InProgress => "In progress",
            MessageStatus::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub customer_id: i64,
    pub content: String,
    pub platform: String,
    pub direction: MessageDirection,
    pub status: MessageStatus,
    #[serde(default)]
    pub external_id: Option<String>,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
}

// =========================================================
// Approval requests
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
    Leave,
    SalaryIncrease,
    Transfer,
    Other,
}

impl RequestType {
    pub const ALL: [RequestType; 4] = [
        RequestType::Leave,
        RequestType::SalaryIncrease,
        RequestType::Transfer,
        RequestType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestType::Leave => "leave",
            RequestType::SalaryIncrease => "salary_increase",
            RequestType::Transfer => "transfer",
            RequestType::Other => "other",
        }
    }

    /// Parses the wire name. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }

    pub fn label(&self) -> &'static str {
        match self {
            RequestType::Leave => "Leave",
            RequestType::SalaryIncrease => "Raise",
            RequestType::Transfer => "Transfer",
            RequestType::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn label(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::Approved => "Approved",
            RequestStatus::Rejected => "Rejected",
        }
    }
}

/// Internal approval request (leave, raise, transfer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalRequest {
    pub id: i64,
    pub user_id: i64,
    #[serde(rename = "type")]
    pub request_type: RequestType,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: RequestStatus,
    #[serde(default)]
    pub reviewed_by: Option<i64>,
    #[serde(default)]
    pub reviewed_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub review_notes: Option<String>,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub reviewer_name: Option<String>,
}
