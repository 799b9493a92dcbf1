pub mod certificates;
pub mod orders;
pub mod tags;
pub mod users;
