use crate::domain::certificate::{
    entity::{Certificate, CertificateUpdate, NewCertificate},
    sort::SortClause,
    value_objects::{CertificateId, CertificateName, Description},
};
use crate::domain::errors::DomainResult;
use crate::domain::tag::{Tag, TagId, TagName};
use crate::domain::user::UserId;
use async_trait::async_trait;

#[async_trait]
pub trait CertificateWriteRepository: Send + Sync {
    /// Inserts the certificate, creating any `ResolvedTag::New` rows and the
    /// tag links in the same transaction.
    async fn insert(&self, certificate: NewCertificate) -> DomainResult<Certificate>;

    /// Applies the update, then removes every tag of `orphan_candidates` left
    /// without links, in one transaction. Returns the certificate and the
    /// removed tags.
    async fn update(
        &self,
        update: CertificateUpdate,
        orphan_candidates: &[TagId],
    ) -> DomainResult<(Certificate, Vec<Tag>)>;

    /// Deletes the certificate and, in the same transaction, its orphaned tags.
    async fn delete(&self, id: CertificateId, orphan_candidates: &[TagId]) -> DomainResult<Vec<Tag>>;

    /// Orphan removal on its own, for mutations that write nothing else.
    /// Candidates that are gone or still linked are skipped.
    async fn purge_orphaned_tags(&self, candidates: &[TagId]) -> DomainResult<Vec<Tag>>;
}

#[async_trait]
pub trait CertificateReadRepository: Send + Sync {
    async fn find_by_id(&self, id: CertificateId) -> DomainResult<Option<Certificate>>;
    async fn find_by_ids(&self, ids: &[CertificateId]) -> DomainResult<Vec<Certificate>>;
    async fn find_by_name_and_description(
        &self,
        name: &CertificateName,
        description: &Description,
    ) -> DomainResult<Option<Certificate>>;
    async fn list(&self, sort: &SortClause) -> DomainResult<Vec<Certificate>>;
    /// Substring match on the name.
    async fn find_by_name(&self, fragment: &str, sort: &SortClause)
    -> DomainResult<Vec<Certificate>>;
    /// Substring match on the description.
    async fn find_by_description(
        &self,
        fragment: &str,
        sort: &SortClause,
    ) -> DomainResult<Vec<Certificate>>;
    /// Certificates carrying every one of `names`.
    async fn find_by_tag_names(
        &self,
        names: &[TagName],
        sort: &SortClause,
    ) -> DomainResult<Vec<Certificate>>;
    /// Certificates bought by the user, each listed once.
    async fn find_by_user_id(&self, user_id: UserId, sort: &SortClause)
    -> DomainResult<Vec<Certificate>>;
    async fn find_by_tag_id(&self, tag_id: TagId) -> DomainResult<Vec<Certificate>>;
}
