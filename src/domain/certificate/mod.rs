pub mod entity;
pub mod repository;
pub mod sort;
pub mod value_objects;

pub use entity::{Certificate, CertificateUpdate, NewCertificate};
pub use repository::{CertificateReadRepository, CertificateWriteRepository};
pub use sort::{SortClause, SortDirection, SortField, SortKey};
pub use value_objects::{CertificateId, CertificateName, Description, Duration, Price};
