use crate::domain::certificate::Certificate;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::TagDto;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CertificateDto {
    pub id: i64,
    pub name: String,
    pub description: String,
    #[schema(value_type = String, example = "49.90")]
    pub price: BigDecimal,
    pub duration: i32,
    pub create_date: DateTime<Utc>,
    pub last_update_date: DateTime<Utc>,
    pub tags: Vec<TagDto>,
}

impl From<Certificate> for CertificateDto {
    fn from(certificate: Certificate) -> Self {
        Self {
            id: certificate.id.into(),
            name: certificate.name.into_inner(),
            description: certificate.description.into_inner(),
            price: certificate.price.into_inner(),
            duration: certificate.duration.days(),
            create_date: certificate.created_at,
            last_update_date: certificate.updated_at,
            tags: certificate.tags.into_iter().map(TagDto::from).collect(),
        }
    }
}
