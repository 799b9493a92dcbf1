// src/infrastructure/repositories/mod.rs
mod error;
mod postgres_certificate;
mod postgres_order;
mod postgres_tag;
mod postgres_user;

pub(crate) use error::{CNT_ORDER_CERTIFICATE, constraint_name, map_sqlx};
pub use postgres_certificate::PostgresCertificateRepository;
pub use postgres_order::PostgresOrderRepository;
pub use postgres_tag::PostgresTagRepository;
pub use postgres_user::PostgresUserRepository;
