use super::CertificateQueryService;
use crate::application::{
    commands::ensure_capability,
    dto::{AuthenticatedUser, OrderDto, TagDto, UserDto},
    error::ApplicationResult,
};

impl CertificateQueryService {
    pub async fn certificate_tags(&self, id: i64) -> ApplicationResult<Vec<TagDto>> {
        let certificate = self.find_certificate(id).await?;
        Ok(certificate.tags.into_iter().map(Into::into).collect())
    }

    pub async fn certificate_orders(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
    ) -> ApplicationResult<Vec<OrderDto>> {
        ensure_capability(actor, "orders", "read")?;
        let certificate = self.find_certificate(id).await?;
        let orders = self.order_repo.find_by_certificate_id(certificate.id).await?;
        Ok(orders.into_iter().map(Into::into).collect())
    }

    /// Every user who bought the certificate at least once.
    pub async fn certificate_users(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
    ) -> ApplicationResult<Vec<UserDto>> {
        ensure_capability(actor, "users", "read")?;
        let certificate = self.find_certificate(id).await?;
        let users = self.user_repo.find_by_certificate_id(certificate.id).await?;
        Ok(users.into_iter().map(Into::into).collect())
    }
}
