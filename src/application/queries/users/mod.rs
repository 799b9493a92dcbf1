mod get_by_id;
mod search;
mod service;

pub use get_by_id::GetUserByIdQuery;
pub use search::SearchUsersQuery;
pub use service::UserQueryService;
