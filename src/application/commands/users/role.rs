use super::UserCommandService;
use crate::{
    application::{
        commands::ensure_capability,
        dto::{AuthenticatedUser, UserDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::{Role, UserId, UserUpdate},
};

pub struct PromoteUserCommand {
    pub user_id: i64,
}

impl UserCommandService {
    /// Grants the `ADMIN` role. Promoting an admin again is a no-op write.
    #[tracing::instrument(skip(self, actor, command), fields(actor_id = actor.id.0, user_id = command.user_id))]
    pub async fn add_admin(
        &self,
        actor: &AuthenticatedUser,
        command: PromoteUserCommand,
    ) -> ApplicationResult<UserDto> {
        ensure_capability(actor, "users", "promote")?;

        let user_id = UserId::new(command.user_id)?;
        let mut user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("user {} not found", user_id.0)))?;
        user.set_role(Role::Admin);

        let updated = self
            .user_repo
            .update(UserUpdate::new(user_id).with_role(user.role))
            .await?;

        tracing::info!(user_id = updated.id.0, "user promoted to admin");
        Ok(updated.into())
    }
}
