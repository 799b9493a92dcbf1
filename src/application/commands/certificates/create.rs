// src/application/commands/certificates/create.rs
use bigdecimal::BigDecimal;

use super::{
    CertificateCommandService,
    fields::{CREATE_RULES, CertificateFields},
};
use crate::{
    application::{
        commands::ensure_capability,
        dto::{AuthenticatedUser, CertificateDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::certificate::{CertificateName, Description, Duration, NewCertificate, Price},
};

#[derive(Debug, Clone, Default)]
pub struct CreateCertificateCommand {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<BigDecimal>,
    pub duration: Option<i32>,
    pub tags: Vec<String>,
}

impl CertificateCommandService {
    #[tracing::instrument(skip(self, actor, command), fields(actor_id = actor.id.0))]
    pub async fn create_certificate(
        &self,
        actor: &AuthenticatedUser,
        command: CreateCertificateCommand,
    ) -> ApplicationResult<CertificateDto> {
        ensure_capability(actor, "certificates", "create")?;

        let fields = CertificateFields {
            name: command.name,
            description: command.description,
            price: command.price,
            duration: command.duration,
            tags: command.tags,
        };
        fields.check(&CREATE_RULES, fields.check_required())?;

        let CertificateFields {
            name: Some(name),
            description: Some(description),
            price: Some(price),
            duration: Some(duration),
            tags,
        } = fields
        else {
            return Err(ApplicationError::infrastructure(
                "certificate fields passed validation while missing",
            ));
        };
        let name = CertificateName::new(name)?;
        let description = Description::new(description)?;

        if let Some(existing) = self
            .read_repo
            .find_by_name_and_description(&name, &description)
            .await?
        {
            return Err(ApplicationError::duplicate(format!(
                "certificate '{}' already exists with id {}",
                existing.name, existing.id.0
            )));
        }

        let tags = self.reconcile_tags(&tags).await?;
        let now = self.clock.now();
        let created = self
            .write_repo
            .insert(NewCertificate {
                name,
                description,
                price: Price::new(price)?,
                duration: Duration::new(duration)?,
                created_at: now,
                updated_at: now,
                tags,
            })
            .await?;

        tracing::info!(certificate_id = created.id.0, "certificate created");
        Ok(created.into())
    }
}
