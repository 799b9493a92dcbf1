use crate::domain::certificate::CertificateId;
use crate::domain::errors::DomainResult;
use crate::domain::order::{
    entity::{NewOrder, Order},
    filter::OrderFilter,
    value_objects::OrderId,
};
use crate::domain::user::UserId;
use async_trait::async_trait;

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn find_by_id(&self, id: OrderId) -> DomainResult<Option<Order>>;

    async fn list(&self) -> DomainResult<Vec<Order>>;

    async fn find_by_user_id(&self, user_id: UserId) -> DomainResult<Vec<Order>>;

    async fn find_by_filter(&self, filter: &OrderFilter) -> DomainResult<Vec<Order>>;

    async fn find_by_certificate_id(&self, id: CertificateId) -> DomainResult<Vec<Order>>;

    /// Stores the order together with its certificate links atomically.
    async fn insert(&self, order: NewOrder) -> DomainResult<Order>;

    async fn delete(&self, id: OrderId) -> DomainResult<()>;
}
