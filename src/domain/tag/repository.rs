use crate::domain::certificate::CertificateId;
use crate::domain::errors::DomainResult;
use crate::domain::tag::{
    entity::Tag,
    value_objects::{TagId, TagName},
};
use async_trait::async_trait;

#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn find_by_id(&self, id: TagId) -> DomainResult<Option<Tag>>;

    /// Exact name lookup.
    async fn find_by_name(&self, name: &TagName) -> DomainResult<Option<Tag>>;

    async fn list(&self) -> DomainResult<Vec<Tag>>;

    async fn find_by_certificate_id(&self, id: CertificateId) -> DomainResult<Vec<Tag>>;

    async fn insert(&self, name: TagName) -> DomainResult<Tag>;

    async fn delete(&self, id: TagId) -> DomainResult<()>;

    /// Tags applied most often among the certificates bought by the user(s)
    /// with the highest total order cost. Ties are all returned.
    async fn most_used_by_top_spenders(&self) -> DomainResult<Vec<Tag>>;
}
