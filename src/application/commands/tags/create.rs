use super::TagCommandService;
use crate::{
    application::{
        commands::ensure_capability,
        dto::{AuthenticatedUser, TagDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{tag::TagName, validation},
};

pub struct CreateTagCommand {
    pub name: String,
}

impl TagCommandService {
    /// Returns the stored tag when the name is already taken.
    #[tracing::instrument(skip(self, actor, command), fields(actor_id = actor.id.0))]
    pub async fn create_tag(
        &self,
        actor: &AuthenticatedUser,
        command: CreateTagCommand,
    ) -> ApplicationResult<TagDto> {
        ensure_capability(actor, "tags", "create")?;

        if !validation::is_name(&command.name) {
            return Err(ApplicationError::invalid_field("name", &command.name));
        }
        let name = TagName::new(command.name)?;

        if let Some(existing) = self.tag_repo.find_by_name(&name).await? {
            tracing::debug!(tag_id = existing.id.0, "tag already exists");
            return Ok(existing.into());
        }

        let created = self.tag_repo.insert(name).await?;
        Ok(created.into())
    }
}
