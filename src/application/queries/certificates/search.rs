// src/application/queries/certificates/search.rs
//! Certificate search: picks one lookup strategy from the supplied
//! parameters, first match wins:
//!
//! 1. `part_of_word` and `tags`: tag lookup, then name/description filter
//! 2. `tags`: certificates carrying every listed tag
//! 3. `part_of_word`: every certificate, then name/description filter
//! 4. `name`: substring match on the name
//! 5. `description`: substring match on the description
//! 6. `user_id`: certificates bought by that user
//! 7. everything
//!
//! Invalid filter values yield an empty result; an invalid `user_id` is an
//! error.
use super::CertificateQueryService;
use crate::{
    application::{
        dto::{CertificateDto, Page},
        error::{ApplicationError, ApplicationResult},
        pagination::{PageRequest, paginate},
    },
    domain::{
        certificate::{Certificate, SortClause},
        tag::TagName,
        user::UserId,
        validation,
    },
};

const TAG_DELIMITER: &str = ", ";

#[derive(Debug, Clone, Default)]
pub struct SearchCertificatesQuery {
    pub name: Option<String>,
    pub description: Option<String>,
    /// `", "`-separated tag names.
    pub tags: Option<String>,
    pub part_of_word: Option<String>,
    pub user_id: Option<i64>,
    /// `", "`-separated `<field> <asc|desc>` tokens.
    pub sort: Option<String>,
    pub page: PageRequest,
}

impl CertificateQueryService {
    pub async fn search_certificates(
        &self,
        query: SearchCertificatesQuery,
    ) -> ApplicationResult<Page<CertificateDto>> {
        let page = query.page;
        let certificates = self.plan_search(query).await?;
        Ok(paginate(certificates, page)?.map(CertificateDto::from))
    }

    async fn plan_search(&self, query: SearchCertificatesQuery) -> ApplicationResult<Vec<Certificate>> {
        let sort = SortClause::parse(query.sort.as_deref());

        match (&query.part_of_word, &query.tags) {
            (Some(fragment), Some(tags)) => {
                tracing::debug!("certificate search by tags and part of word");
                let tagged = self.by_tags(tags, &sort).await?;
                return Ok(filter_mentioning(fragment, tagged));
            }
            (None, Some(tags)) => {
                tracing::debug!("certificate search by tags");
                return self.by_tags(tags, &sort).await;
            }
            (Some(fragment), None) => {
                tracing::debug!("certificate search by part of word");
                if !validation::is_generic_param(fragment) {
                    return Ok(Vec::new());
                }
                let all = self.read_repo.list(&sort).await?;
                return Ok(filter_mentioning(fragment, all));
            }
            (None, None) => {}
        }

        if let Some(name) = &query.name {
            tracing::debug!("certificate search by name");
            if !validation::is_name(name) {
                return Ok(Vec::new());
            }
            return Ok(self.read_repo.find_by_name(name, &sort).await?);
        }

        if let Some(description) = &query.description {
            tracing::debug!("certificate search by description");
            if !validation::is_description(description) {
                return Ok(Vec::new());
            }
            return Ok(self.read_repo.find_by_description(description, &sort).await?);
        }

        if let Some(raw) = query.user_id {
            tracing::debug!("certificate search by user");
            let user_id =
                UserId::new(raw).map_err(|_| ApplicationError::invalid_parameter("user_id", raw))?;
            return Ok(self.read_repo.find_by_user_id(user_id, &sort).await?);
        }

        Ok(self.read_repo.list(&sort).await?)
    }

    /// Invalid names are skipped; if none survive the result is empty
    /// rather than "all certificates".
    async fn by_tags(&self, raw: &str, sort: &SortClause) -> ApplicationResult<Vec<Certificate>> {
        let names: Vec<TagName> = raw
            .split(TAG_DELIMITER)
            .filter(|name| validation::is_name(name))
            .map(TagName::new)
            .collect::<Result<_, _>>()?;
        if names.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.read_repo.find_by_tag_names(&names, sort).await?)
    }
}

fn filter_mentioning(fragment: &str, certificates: Vec<Certificate>) -> Vec<Certificate> {
    if !validation::is_generic_param(fragment) {
        return Vec::new();
    }
    certificates
        .into_iter()
        .filter(|certificate| certificate.mentions(fragment))
        .collect()
}
