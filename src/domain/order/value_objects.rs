use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::validation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrderId(pub i64);

impl OrderId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if !validation::is_positive_id(id) {
            Err(DomainError::validation("order id must be positive"))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<OrderId> for i64 {
    fn from(value: OrderId) -> Self {
        value.0
    }
}
