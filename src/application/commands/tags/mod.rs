mod create;
mod delete;
mod service;

pub use create::CreateTagCommand;
pub use delete::DeleteTagCommand;
pub use service::TagCommandService;
