use crate::domain::certificate::CertificateId;
use crate::domain::errors::DomainResult;
use crate::domain::user::{
    entity::{NewUser, User, UserUpdate},
    value_objects::{Email, PersonName, UserId},
};
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>>;

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<User>>;

    async fn list(&self) -> DomainResult<Vec<User>>;

    async fn find_by_first_name(&self, first_name: &PersonName) -> DomainResult<Vec<User>>;

    async fn find_by_last_name(&self, last_name: &PersonName) -> DomainResult<Vec<User>>;

    async fn find_by_full_name(
        &self,
        first_name: &PersonName,
        last_name: &PersonName,
    ) -> DomainResult<Vec<User>>;

    /// Users with at least one order containing the certificate.
    async fn find_by_certificate_id(&self, id: CertificateId) -> DomainResult<Vec<User>>;

    async fn insert(&self, new_user: NewUser) -> DomainResult<User>;

    async fn update(&self, update: UserUpdate) -> DomainResult<User>;
}
