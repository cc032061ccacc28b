use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::interaction::ContactType;
use crate::Id;

closed_enum! {
    pub enum FollowUpStatus {
        #[serde(alias = "PENDING", alias = "scheduled")]
        Pending => ("pending", "Pending"),
        #[serde(alias = "COMPLETED", alias = "done")]
        Completed => ("completed", "Completed"),
        #[serde(alias = "CANCELLED", alias = "canceled")]
        Cancelled => ("cancelled", "Cancelled"),
    }
}

closed_enum! {
    pub enum Priority {
        #[serde(alias = "LOW")]
        Low => ("low", "Low"),
        #[serde(alias = "MEDIUM", alias = "normal")]
        Medium => ("medium", "Medium"),
        #[serde(alias = "HIGH")]
        High => ("high", "High"),
        #[serde(alias = "URGENT")]
        Urgent => ("urgent", "Urgent"),
    }
}

impl FollowUpStatus {
    pub fn badge_class(&self) -> &'static str {
        match self {
            FollowUpStatus::Pending => "badge badge-warning",
            FollowUpStatus::Completed => "badge badge-success",
            FollowUpStatus::Cancelled => "badge badge-secondary",
        }
    }
}

impl Priority {
    pub fn badge_class(&self) -> &'static str {
        match self {
            Priority::Low => "badge badge-secondary",
            Priority::Medium => "badge badge-info",
            Priority::High => "badge badge-warning",
            Priority::Urgent => "badge badge-danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowUp {
    pub id: Id,
    pub customer: Id,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub interaction: Option<Id>,
    pub scheduled_date: DateTime<Utc>,
    pub follow_up_type: ContactType,
    pub assigned_to: Id,
    #[serde(default)]
    pub assigned_to_name: Option<String>,
    pub priority: Priority,
    pub status: FollowUpStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completion_notes: Option<String>,
}

impl FollowUp {
    pub fn is_pending(&self) -> bool {
        self.status == FollowUpStatus::Pending
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.is_pending() && self.scheduled_date < now
    }
}

/// Body for `POST follow-ups/` and `PUT follow-ups/{id}/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowUpPayload {
    pub customer: Id,
    pub interaction: Option<Id>,
    pub scheduled_date: DateTime<Utc>,
    pub follow_up_type: ContactType,
    pub assigned_to: Id,
    pub priority: Priority,
    pub notes: Option<String>,
}

/// Body for `POST interactions/{id}/create_follow_up/`. Customer and
/// interaction come from the path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleFollowUpPayload {
    pub scheduled_date: DateTime<Utc>,
    pub follow_up_type: ContactType,
    pub assigned_to: Id,
    pub priority: Priority,
    pub notes: Option<String>,
}

impl From<FollowUpPayload> for ScheduleFollowUpPayload {
    fn from(payload: FollowUpPayload) -> Self {
        Self {
            scheduled_date: payload.scheduled_date,
            follow_up_type: payload.follow_up_type,
            assigned_to: payload.assigned_to,
            priority: payload.priority,
            notes: payload.notes,
        }
    }
}

/// Body for `POST follow-ups/{id}/reschedule/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReschedulePayload {
    pub scheduled_date: DateTime<Utc>,
    pub reason: Option<String>,
}

/// Body for `POST follow-ups/{id}/complete/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompleteFollowUpPayload {
    pub completion_notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_follow_up_overdue() {
        let json = r#"{
            "id": 8,
            "customer": 4,
            "scheduled_date": "2024-03-01T09:00:00+01:00",
            "follow_up_type": "visit",
            "assigned_to": 2,
            "priority": "high",
            "status": "pending"
        }"#;
        let follow_up: FollowUp = serde_json::from_str(json).unwrap();
        assert_eq!(
            follow_up.scheduled_date,
            Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()
        );
        assert!(follow_up.is_overdue(Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap()));
        assert!(!follow_up.is_overdue(Utc.with_ymd_and_hms(2024, 2, 28, 0, 0, 0).unwrap()));
    }
}
