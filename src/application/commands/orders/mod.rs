mod create;
mod delete;
mod service;

pub use create::CreateOrderCommand;
pub use delete::DeleteOrderCommand;
pub use service::OrderCommandService;
