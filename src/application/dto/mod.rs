pub mod auth;
pub mod certificates;
pub mod orders;
pub mod pagination;
pub mod tags;
pub mod users;

pub use auth::{AuthTokenDto, AuthenticatedUser, TokenSubject};
pub use certificates::CertificateDto;
pub use orders::OrderDto;
pub use pagination::Page;
pub use tags::TagDto;
pub use users::UserDto;
