use super::TagQueryService;
use crate::{
    application::{
        dto::{CertificateDto, TagDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::tag::{Tag, TagId},
};

pub struct GetTagByIdQuery {
    pub id: i64,
}

impl TagQueryService {
    pub async fn get_tag_by_id(&self, query: GetTagByIdQuery) -> ApplicationResult<TagDto> {
        Ok(self.find_tag(query.id).await?.into())
    }

    pub async fn tag_certificates(&self, id: i64) -> ApplicationResult<Vec<CertificateDto>> {
        let tag = self.find_tag(id).await?;
        let certificates = self.certificate_repo.find_by_tag_id(tag.id).await?;
        Ok(certificates.into_iter().map(Into::into).collect())
    }

    async fn find_tag(&self, raw_id: i64) -> ApplicationResult<Tag> {
        let id = TagId::new(raw_id).map_err(|_| ApplicationError::invalid_parameter("id", raw_id))?;
        self.tag_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("tag {raw_id} not found")))
    }
}
