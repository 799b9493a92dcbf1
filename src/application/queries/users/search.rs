use super::UserQueryService;
use crate::{
    application::{
        commands::ensure_capability,
        dto::{AuthenticatedUser, Page, UserDto},
        error::{ApplicationError, ApplicationResult},
        pagination::{PageRequest, paginate},
    },
    domain::{
        certificate::CertificateId,
        user::{Email, PersonName, User},
        validation,
    },
};

#[derive(Debug, Clone, Default)]
pub struct SearchUsersQuery {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub certificate_id: Option<i64>,
    pub page: PageRequest,
}

impl UserQueryService {
    /// Full name, first name, last name, e-mail, certificate, then everyone.
    /// Invalid names or e-mails yield an empty result.
    pub async fn search_users(
        &self,
        actor: &AuthenticatedUser,
        query: SearchUsersQuery,
    ) -> ApplicationResult<Page<UserDto>> {
        ensure_capability(actor, "users", "read")?;
        let users = self.plan_search(&query).await?;
        Ok(paginate(users, query.page)?.map(UserDto::from))
    }

    async fn plan_search(&self, query: &SearchUsersQuery) -> ApplicationResult<Vec<User>> {
        match (&query.first_name, &query.last_name) {
            (Some(first), Some(last)) => {
                let (Some(first), Some(last)) = (person_name(first), person_name(last)) else {
                    return Ok(Vec::new());
                };
                return Ok(self.user_repo.find_by_full_name(&first, &last).await?);
            }
            (Some(first), None) => {
                let Some(first) = person_name(first) else {
                    return Ok(Vec::new());
                };
                return Ok(self.user_repo.find_by_first_name(&first).await?);
            }
            (None, Some(last)) => {
                let Some(last) = person_name(last) else {
                    return Ok(Vec::new());
                };
                return Ok(self.user_repo.find_by_last_name(&last).await?);
            }
            (None, None) => {}
        }

        if let Some(email) = &query.email {
            if !validation::is_email(email) {
                return Ok(Vec::new());
            }
            let email = Email::new(email.as_str())?;
            return Ok(self.user_repo.find_by_email(&email).await?.into_iter().collect());
        }

        if let Some(raw) = query.certificate_id {
            let id = CertificateId::new(raw)
                .map_err(|_| ApplicationError::invalid_parameter("certificate_id", raw))?;
            return Ok(self.user_repo.find_by_certificate_id(id).await?);
        }

        Ok(self.user_repo.list().await?)
    }
}

fn person_name(raw: &str) -> Option<PersonName> {
    PersonName::new(raw).ok()
}
