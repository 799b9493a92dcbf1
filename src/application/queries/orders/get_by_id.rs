use std::collections::HashMap;

use super::OrderQueryService;
use crate::{
    application::{
        commands::ensure_capability,
        dto::{AuthenticatedUser, CertificateDto, OrderDto, UserDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::order::{Order, OrderId},
};

pub struct GetOrderByIdQuery {
    pub id: i64,
}

impl OrderQueryService {
    pub async fn get_order_by_id(
        &self,
        actor: &AuthenticatedUser,
        query: GetOrderByIdQuery,
    ) -> ApplicationResult<OrderDto> {
        ensure_capability(actor, "orders", "read")?;
        Ok(self.find_order(query.id).await?.into())
    }

    /// Purchased certificates in purchase order, repeats included.
    pub async fn order_certificates(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
    ) -> ApplicationResult<Vec<CertificateDto>> {
        ensure_capability(actor, "orders", "read")?;
        let order = self.find_order(id).await?;

        let by_id: HashMap<_, _> = self
            .certificate_repo
            .find_by_ids(&order.certificate_ids)
            .await?
            .into_iter()
            .map(|certificate| (certificate.id, certificate))
            .collect();

        Ok(order
            .certificate_ids
            .iter()
            .filter_map(|id| by_id.get(id).cloned())
            .map(Into::into)
            .collect())
    }

    pub async fn order_user(&self, actor: &AuthenticatedUser, id: i64) -> ApplicationResult<UserDto> {
        ensure_capability(actor, "orders", "read")?;
        let order = self.find_order(id).await?;
        let user = self
            .user_repo
            .find_by_id(order.user_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("user {} not found", order.user_id.0)))?;
        Ok(user.into())
    }

    async fn find_order(&self, raw_id: i64) -> ApplicationResult<Order> {
        let id = OrderId::new(raw_id).map_err(|_| ApplicationError::invalid_parameter("id", raw_id))?;
        self.order_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("order {raw_id} not found")))
    }
}
