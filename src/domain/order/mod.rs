pub mod entity;
pub mod filter;
pub mod repository;
pub mod value_objects;

pub use entity::{NewOrder, Order};
pub use filter::{OrderFilter, RangeBound};
pub use repository::OrderRepository;
pub use value_objects::OrderId;
