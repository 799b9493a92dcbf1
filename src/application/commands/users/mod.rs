mod login;
mod password;
mod register;
mod role;
mod service;

pub use login::{LoginResult, LoginUserCommand};
pub use register::RegisterUserCommand;
pub use role::PromoteUserCommand;
pub use service::UserCommandService;
