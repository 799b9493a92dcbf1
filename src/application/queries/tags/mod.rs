mod get_by_id;
mod search;
mod service;

pub use get_by_id::GetTagByIdQuery;
pub use search::SearchTagsQuery;
pub use service::TagQueryService;
