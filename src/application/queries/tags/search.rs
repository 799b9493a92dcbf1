use super::TagQueryService;
use crate::{
    application::{
        dto::{Page, TagDto},
        error::{ApplicationError, ApplicationResult},
        pagination::{PageRequest, paginate},
    },
    domain::{certificate::CertificateId, tag::TagName, validation},
};

#[derive(Debug, Clone, Default)]
pub struct SearchTagsQuery {
    /// Exact tag name.
    pub name: Option<String>,
    pub certificate_id: Option<i64>,
    pub page: PageRequest,
}

impl TagQueryService {
    /// Name lookup, then certificate lookup, then every tag.
    pub async fn search_tags(&self, query: SearchTagsQuery) -> ApplicationResult<Page<TagDto>> {
        let tags = if let Some(name) = query.name {
            if validation::is_name(&name) {
                let name = TagName::new(name)?;
                self.tag_repo.find_by_name(&name).await?.into_iter().collect()
            } else {
                Vec::new()
            }
        } else if let Some(raw) = query.certificate_id {
            let id = CertificateId::new(raw)
                .map_err(|_| ApplicationError::invalid_parameter("certificate_id", raw))?;
            self.tag_repo.find_by_certificate_id(id).await?
        } else {
            self.tag_repo.list().await?
        };

        Ok(paginate(tags, query.page)?.map(TagDto::from))
    }

    /// Tags used most often on the certificates bought by the user(s) with
    /// the highest total spend.
    pub async fn most_used_tags_of_top_spenders(
        &self,
        page: PageRequest,
    ) -> ApplicationResult<Page<TagDto>> {
        let tags = self.tag_repo.most_used_by_top_spenders().await?;
        Ok(paginate(tags, page)?.map(TagDto::from))
    }
}
