// src/application/commands/certificates/update.rs
use bigdecimal::BigDecimal;

use super::{
    CertificateCommandService,
    fields::{CertificateFields, UPDATE_RULES},
};
use crate::{
    application::{
        commands::ensure_capability,
        dto::{AuthenticatedUser, CertificateDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        certificate::{
            CertificateId, CertificateName, CertificateUpdate, Description, Duration, Price,
        },
        tag::TagReconciler,
    },
};

/// Partial update. A `duration` of 0 counts as absent; an empty `tags` list
/// keeps the current tags.
#[derive(Debug, Clone, Default)]
pub struct UpdateCertificateCommand {
    pub id: i64,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<BigDecimal>,
    pub duration: Option<i32>,
    pub tags: Vec<String>,
}

impl CertificateCommandService {
    #[tracing::instrument(skip(self, actor, command), fields(actor_id = actor.id.0, certificate_id = command.id))]
    pub async fn update_certificate(
        &self,
        actor: &AuthenticatedUser,
        command: UpdateCertificateCommand,
    ) -> ApplicationResult<CertificateDto> {
        ensure_capability(actor, "certificates", "update")?;

        let id = CertificateId::new(command.id)?;
        let current = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("certificate {} not found", id.0)))?;

        let changed = CertificateFields {
            name: command.name.filter(|name| name != current.name.as_str()),
            description: command
                .description
                .filter(|description| description != current.description.as_str()),
            price: command
                .price
                .filter(|price| price != current.price.as_decimal()),
            duration: command
                .duration
                .filter(|days| *days != 0 && *days != current.duration.days()),
            tags: command.tags,
        };
        changed.check(&UPDATE_RULES, Default::default())?;

        let mut update = CertificateUpdate::new(id, self.clock.now());
        if let Some(name) = changed.name {
            update = update.with_name(CertificateName::new(name)?);
        }
        if let Some(description) = changed.description {
            update = update.with_description(Description::new(description)?);
        }
        if let Some(price) = changed.price {
            update = update.with_price(Price::new(price)?);
        }
        if let Some(days) = changed.duration {
            update = update.with_duration(Duration::new(days)?);
        }
        if !changed.tags.is_empty() {
            update = update.with_tags(self.reconcile_tags(&changed.tags).await?);
        }

        // The previous tags are re-checked even when the tag set is kept.
        let candidates = TagReconciler::orphan_candidates(&current.tags);
        let (updated, purged) = if update.has_changes() {
            self.write_repo.update(update, &candidates).await?
        } else {
            tracing::debug!("no changed fields, skipping write");
            let purged = self.write_repo.purge_orphaned_tags(&candidates).await?;
            (current, purged)
        };

        tracing::info!(purged_tags = purged.len(), "certificate updated");
        Ok(updated.into())
    }
}
