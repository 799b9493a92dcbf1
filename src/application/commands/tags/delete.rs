use super::TagCommandService;
use crate::{
    application::{
        commands::ensure_capability,
        dto::AuthenticatedUser,
        error::{ApplicationError, ApplicationResult},
    },
    domain::tag::TagId,
};

pub struct DeleteTagCommand {
    pub id: i64,
}

impl TagCommandService {
    /// Removes the tag and its certificate links.
    #[tracing::instrument(skip(self, actor, command), fields(actor_id = actor.id.0, tag_id = command.id))]
    pub async fn delete_tag(
        &self,
        actor: &AuthenticatedUser,
        command: DeleteTagCommand,
    ) -> ApplicationResult<()> {
        ensure_capability(actor, "tags", "delete")?;

        let id = TagId::new(command.id)?;
        self.tag_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("tag {} not found", id.0)))?;

        self.tag_repo.delete(id).await?;
        Ok(())
    }
}
