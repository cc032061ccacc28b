use shared::{CompleteInteractionPayload, Id, Interaction, InteractionPayload, ScheduleFollowUpPayload};

use crate::error::ApiResult;

super::service!(InteractionService, Interaction, InteractionPayload, "interactions/");

impl InteractionService {
    /// Record the outcome. An interaction is completed once, by PATCH.
    pub async fn complete(&self, id: &Id, payload: &CompleteInteractionPayload) -> ApiResult<Interaction> {
        self.partial_update(id, payload).await
    }

    pub async fn create_follow_up(&self, id: &Id, payload: &ScheduleFollowUpPayload) -> ApiResult<()> {
        self.action(id, "create_follow_up", Some(payload)).await
    }
}
