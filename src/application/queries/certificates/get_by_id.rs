use super::CertificateQueryService;
use crate::{
    application::{
        dto::CertificateDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::certificate::{Certificate, CertificateId},
};

pub struct GetCertificateByIdQuery {
    pub id: i64,
}

impl CertificateQueryService {
    pub async fn get_certificate_by_id(
        &self,
        query: GetCertificateByIdQuery,
    ) -> ApplicationResult<CertificateDto> {
        Ok(self.find_certificate(query.id).await?.into())
    }

    /// `InvalidParameter` for a non-positive id, `NotFound` when absent.
    pub async fn find_certificate(&self, raw_id: i64) -> ApplicationResult<Certificate> {
        let id = CertificateId::new(raw_id)
            .map_err(|_| ApplicationError::invalid_parameter("id", raw_id))?;
        self.read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("certificate {raw_id} not found")))
    }
}
