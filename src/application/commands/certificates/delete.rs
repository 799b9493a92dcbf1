// src/application/commands/certificates/delete.rs
use super::CertificateCommandService;
use crate::{
    application::{
        commands::ensure_capability,
        dto::AuthenticatedUser,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{certificate::CertificateId, tag::TagReconciler},
};

pub struct DeleteCertificateCommand {
    pub id: i64,
}

impl CertificateCommandService {
    #[tracing::instrument(skip(self, actor, command), fields(actor_id = actor.id.0, certificate_id = command.id))]
    pub async fn delete_certificate(
        &self,
        actor: &AuthenticatedUser,
        command: DeleteCertificateCommand,
    ) -> ApplicationResult<()> {
        ensure_capability(actor, "certificates", "delete")?;

        let id = CertificateId::new(command.id)?;
        let certificate = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("certificate {} not found", id.0)))?;

        let purged = self
            .write_repo
            .delete(id, &TagReconciler::orphan_candidates(&certificate.tags))
            .await?;

        tracing::info!(purged_tags = purged.len(), "certificate deleted");
        Ok(())
    }
}
