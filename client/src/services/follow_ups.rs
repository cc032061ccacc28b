use shared::{CompleteFollowUpPayload, FollowUp, FollowUpPayload, Id, ReschedulePayload};

use crate::error::ApiResult;

super::service!(FollowUpService, FollowUp, FollowUpPayload, "follow-ups/");

impl FollowUpService {
    pub async fn complete(&self, id: &Id, payload: &CompleteFollowUpPayload) -> ApiResult<()> {
        self.action(id, "complete", Some(payload)).await
    }

    /// Only pending follow-ups can be rescheduled; the server rejects others.
    pub async fn reschedule(&self, id: &Id, payload: &ReschedulePayload) -> ApiResult<()> {
        self.action(id, "reschedule", Some(payload)).await
    }
}
