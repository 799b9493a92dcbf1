use std::sync::Arc;

use crate::domain::{certificate::CertificateReadRepository, tag::TagRepository};

pub struct TagQueryService {
    pub(super) tag_repo: Arc<dyn TagRepository>,
    pub(super) certificate_repo: Arc<dyn CertificateReadRepository>,
}

impl TagQueryService {
    pub fn new(
        tag_repo: Arc<dyn TagRepository>,
        certificate_repo: Arc<dyn CertificateReadRepository>,
    ) -> Self {
        Self {
            tag_repo,
            certificate_repo,
        }
    }
}
