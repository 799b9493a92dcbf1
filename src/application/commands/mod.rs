mod capability;
pub mod certificates;
pub mod orders;
pub mod tags;
pub mod users;

pub(crate) use capability::ensure_capability;
