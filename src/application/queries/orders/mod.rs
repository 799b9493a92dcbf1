mod get_by_id;
mod search;
mod service;

pub use get_by_id::GetOrderByIdQuery;
pub use search::SearchOrdersQuery;
pub use service::OrderQueryService;
