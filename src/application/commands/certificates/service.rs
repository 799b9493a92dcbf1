// src/application/commands/certificates/service.rs
use std::sync::Arc;

use crate::{
    application::{
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::{
        certificate::{CertificateReadRepository, CertificateWriteRepository},
        errors::DomainError,
        tag::{ResolvedTag, TagReconciler},
    },
};

pub struct CertificateCommandService {
    pub(super) write_repo: Arc<dyn CertificateWriteRepository>,
    pub(super) read_repo: Arc<dyn CertificateReadRepository>,
    pub(super) tag_reconciler: Arc<TagReconciler>,
    pub(super) clock: Arc<dyn Clock>,
}

impl CertificateCommandService {
    pub fn new(
        write_repo: Arc<dyn CertificateWriteRepository>,
        read_repo: Arc<dyn CertificateReadRepository>,
        tag_reconciler: Arc<TagReconciler>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            write_repo,
            read_repo,
            tag_reconciler,
            clock,
        }
    }

    pub(super) async fn reconcile_tags(&self, names: &[String]) -> ApplicationResult<Vec<ResolvedTag>> {
        self.tag_reconciler
            .reconcile(names)
            .await
            .map_err(|err| match err {
                DomainError::Validation(_) => {
                    ApplicationError::invalid_field("tags", names.join(", "))
                }
                other => other.into(),
            })
    }
}
