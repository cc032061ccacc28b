use validator::Validate;

use super::rules::{known_contact_type, known_priority, required, valid_datetime};
use super::{
    choice, datetime, optional_id, optional_text, required_id, FieldErrors, FormContext,
    FormSchema,
};
use crate::{format, CompleteFollowUpPayload, FollowUp, FollowUpPayload, ReschedulePayload};

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct FollowUpForm {
    #[validate(custom(function = "required", message = "Select a customer"))]
    pub customer: String,
    pub interaction: String,
    #[validate(
        custom(function = "required", message = "Scheduled date is required"),
        custom = "valid_datetime"
    )]
    pub scheduled_date: String,
    #[validate(
        custom(function = "required", message = "Follow-up type is required"),
        custom = "known_contact_type"
    )]
    pub follow_up_type: String,
    #[validate(custom(function = "required", message = "Assign the follow-up to someone"))]
    pub assigned_to: String,
    #[validate(
        custom(function = "required", message = "Priority is required"),
        custom = "known_priority"
    )]
    pub priority: String,
    pub notes: String,
    /// Existing follow-ups may keep a past date.
    pub editing: bool,
}

impl FollowUpForm {
    pub fn blank(customer: Option<&str>, assigned_to: Option<&str>) -> Self {
        Self {
            customer: customer.unwrap_or_default().to_string(),
            follow_up_type: "call".to_string(),
            assigned_to: assigned_to.unwrap_or_default().to_string(),
            priority: "medium".to_string(),
            ..Default::default()
        }
    }

    pub fn from_entity(follow_up: &FollowUp, ctx: &FormContext) -> Self {
        Self {
            customer: follow_up.customer.to_string(),
            interaction: follow_up
                .interaction
                .as_ref()
                .map(|id| id.to_string())
                .unwrap_or_default(),
            scheduled_date: format::format_datetime_input(follow_up.scheduled_date, ctx.offset),
            follow_up_type: follow_up.follow_up_type.as_str().to_string(),
            assigned_to: follow_up.assigned_to.to_string(),
            priority: follow_up.priority.as_str().to_string(),
            notes: follow_up.notes.clone().unwrap_or_default(),
            editing: true,
        }
    }
}

impl FormSchema for FollowUpForm {
    type Payload = FollowUpPayload;

    fn refine(&self, ctx: &FormContext, errors: &mut FieldErrors) {
        if self.editing {
            return;
        }
        if let Some(scheduled) = format::parse_datetime_input(&self.scheduled_date, ctx.offset) {
            if scheduled <= ctx.now {
                errors.insert("scheduled_date", "Schedule the follow-up in the future");
            }
        }
    }

    fn to_payload(&self, ctx: &FormContext) -> Result<FollowUpPayload, FieldErrors> {
        Ok(FollowUpPayload {
            customer: required_id("customer", &self.customer)?,
            interaction: optional_id(&self.interaction),
            scheduled_date: datetime("scheduled_date", &self.scheduled_date, ctx)?,
            follow_up_type: choice("follow_up_type", &self.follow_up_type)?,
            assigned_to: required_id("assigned_to", &self.assigned_to)?,
            priority: choice("priority", &self.priority)?,
            notes: optional_text(&self.notes),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct RescheduleForm {
    #[validate(
        custom(function = "required", message = "New date is required"),
        custom = "valid_datetime"
    )]
    pub scheduled_date: String,
    pub reason: String,
}

impl FormSchema for RescheduleForm {
    type Payload = ReschedulePayload;

    fn refine(&self, ctx: &FormContext, errors: &mut FieldErrors) {
        if let Some(scheduled) = format::parse_datetime_input(&self.scheduled_date, ctx.offset) {
            if scheduled <= ctx.now {
                errors.insert("scheduled_date", "New date must be in the future");
            }
        }
    }

    fn to_payload(&self, ctx: &FormContext) -> Result<ReschedulePayload, FieldErrors> {
        Ok(ReschedulePayload {
            scheduled_date: datetime("scheduled_date", &self.scheduled_date, ctx)?,
            reason: optional_text(&self.reason),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct CompleteFollowUpForm {
    #[validate(length(max = 2000, message = "Keep notes under 2000 characters"))]
    pub completion_notes: String,
}

impl FormSchema for CompleteFollowUpForm {
    type Payload = CompleteFollowUpPayload;

    fn to_payload(&self, _ctx: &FormContext) -> Result<CompleteFollowUpPayload, FieldErrors> {
        Ok(CompleteFollowUpPayload {
            completion_notes: optional_text(&self.completion_notes),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::test_support::ctx;
    use crate::{Priority, ScheduleFollowUpPayload};

    fn valid_form() -> FollowUpForm {
        FollowUpForm {
            scheduled_date: "2024-06-16T10:00".into(),
            ..FollowUpForm::blank(Some("4"), Some("2"))
        }
    }

    #[test]
    fn test_new_follow_up() {
        let payload = valid_form().check(&ctx()).unwrap();
        assert_eq!(payload.priority, Priority::Medium);
        assert_eq!(payload.assigned_to.as_str(), "2");
    }

    #[test]
    fn test_new_follow_up_must_be_future() {
        let form = FollowUpForm {
            scheduled_date: "2024-06-14T10:00".into(),
            ..valid_form()
        };
        assert!(form.check(&ctx()).unwrap_err().contains("scheduled_date"));

        let editing = FollowUpForm {
            editing: true,
            ..form
        };
        assert!(editing.check(&ctx()).is_ok());
    }

    #[test]
    fn test_schedule_payload_from_interaction() {
        let form = FollowUpForm {
            interaction: "11".into(),
            ..valid_form()
        };
        let payload = ScheduleFollowUpPayload::from(form.check(&ctx()).unwrap());
        assert_eq!(payload.assigned_to.as_str(), "2");
    }

    #[test]
    fn test_reschedule_needs_future_date() {
        assert!(RescheduleForm::default().check(&ctx()).unwrap_err().contains("scheduled_date"));
        let past = RescheduleForm {
            scheduled_date: "2024-06-15T11:59".into(),
            reason: String::new(),
        };
        assert!(past.check(&ctx()).is_err());
        let future = RescheduleForm {
            scheduled_date: "2024-06-20T09:00".into(),
            reason: "Customer travelling".into(),
        };
        assert_eq!(future.check(&ctx()).unwrap().reason.as_deref(), Some("Customer travelling"));
    }

    #[test]
    fn test_missing_assignee() {
        let form = FollowUpForm {
            assigned_to: String::new(),
            ..valid_form()
        };
        assert_eq!(
            form.check(&ctx()).unwrap_err().get("assigned_to"),
            Some("Assign the follow-up to someone")
        );
    }
}
