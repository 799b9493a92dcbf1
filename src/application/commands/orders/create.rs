use super::OrderCommandService;
use crate::{
    application::{
        commands::ensure_capability,
        dto::{AuthenticatedUser, OrderDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{order::NewOrder, user::Email},
};

pub struct CreateOrderCommand {
    /// Purchase order is kept; the same id may appear more than once.
    pub certificate_ids: Vec<i64>,
}

impl OrderCommandService {
    /// Buys the listed certificates for the calling user. The cost is the
    /// exact sum of the certificate prices at this moment and never changes.
    #[tracing::instrument(skip(self, actor, command))]
    pub async fn create_order(
        &self,
        actor: Option<&AuthenticatedUser>,
        command: CreateOrderCommand,
    ) -> ApplicationResult<OrderDto> {
        let actor =
            actor.ok_or_else(|| ApplicationError::access_denied("an authenticated user is required"))?;
        ensure_capability(actor, "orders", "create")?;

        let email = Email::new(actor.email.as_str())
            .map_err(|_| ApplicationError::access_denied("principal is not a known user"))?;
        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or_else(|| ApplicationError::access_denied("principal is not a known user"))?;

        let mut certificates = Vec::with_capacity(command.certificate_ids.len());
        for id in command.certificate_ids {
            certificates.push(self.certificate_queries.find_certificate(id).await?);
        }
        if certificates.is_empty() {
            return Err(ApplicationError::invalid_field("certificate_ids", "[]"));
        }

        let order = NewOrder::purchase(user.id, &certificates, self.clock.now());
        let created = self.order_repo.insert(order).await?;

        tracing::info!(order_id = created.id.0, user_id = user.id.0, cost = %created.cost, "order created");
        Ok(created.into())
    }
}
