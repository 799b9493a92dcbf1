use super::UserQueryService;
use crate::{
    application::{
        commands::ensure_capability,
        dto::{AuthenticatedUser, CertificateDto, OrderDto, UserDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        certificate::SortClause,
        user::{User, UserId},
    },
};

pub struct GetUserByIdQuery {
    pub id: i64,
}

impl UserQueryService {
    pub async fn get_user_by_id(
        &self,
        actor: &AuthenticatedUser,
        query: GetUserByIdQuery,
    ) -> ApplicationResult<UserDto> {
        ensure_capability(actor, "users", "read")?;
        Ok(self.find_user(query.id).await?.into())
    }

    pub async fn user_orders(&self, actor: &AuthenticatedUser, id: i64) -> ApplicationResult<Vec<OrderDto>> {
        ensure_capability(actor, "users", "read")?;
        let user = self.find_user(id).await?;
        let orders = self.order_repo.find_by_user_id(user.id).await?;
        Ok(orders.into_iter().map(Into::into).collect())
    }

    /// Distinct certificates across all of the user's orders.
    pub async fn user_certificates(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
    ) -> ApplicationResult<Vec<CertificateDto>> {
        ensure_capability(actor, "users", "read")?;
        let user = self.find_user(id).await?;
        let certificates = self
            .certificate_repo
            .find_by_user_id(user.id, &SortClause::unsorted())
            .await?;
        Ok(certificates.into_iter().map(Into::into).collect())
    }

    async fn find_user(&self, raw_id: i64) -> ApplicationResult<User> {
        let id = UserId::new(raw_id).map_err(|_| ApplicationError::invalid_parameter("id", raw_id))?;
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("user {raw_id} not found")))
    }
}
