// src/application/commands/certificates/mod.rs
mod create;
mod delete;
mod fields;
mod service;
mod update;

pub use create::CreateCertificateCommand;
pub use delete::DeleteCertificateCommand;
pub use service::CertificateCommandService;
pub use update::UpdateCertificateCommand;
