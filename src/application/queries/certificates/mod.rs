mod get_by_id;
mod related;
mod search;
mod service;

pub use get_by_id::GetCertificateByIdQuery;
pub use search::SearchCertificatesQuery;
pub use service::CertificateQueryService;
