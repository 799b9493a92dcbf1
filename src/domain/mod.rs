pub mod certificate;
pub mod errors;
pub mod order;
pub mod tag;
pub mod user;
pub mod validation;
