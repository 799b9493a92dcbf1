// tests/support/mocks/mod.rs
pub mod security;
pub mod store;
pub mod time;

pub use security::*;
pub use store::InMemoryStore;
pub use time::*;
