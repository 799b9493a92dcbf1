use super::OrderCommandService;
use crate::{
    application::{
        commands::ensure_capability,
        dto::AuthenticatedUser,
        error::{ApplicationError, ApplicationResult},
    },
    domain::order::OrderId,
};

pub struct DeleteOrderCommand {
    pub id: i64,
}

impl OrderCommandService {
    /// Removes the order only; its certificates stay in the catalog.
    #[tracing::instrument(skip(self, actor, command), fields(actor_id = actor.id.0, order_id = command.id))]
    pub async fn delete_order(
        &self,
        actor: &AuthenticatedUser,
        command: DeleteOrderCommand,
    ) -> ApplicationResult<()> {
        ensure_capability(actor, "orders", "delete")?;

        let id = OrderId::new(command.id)?;
        self.order_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("order {} not found", id.0)))?;

        self.order_repo.delete(id).await?;
        Ok(())
    }
}
