use crate::domain::tag::value_objects::{TagId, TagName};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag {
    pub id: TagId,
    pub name: TagName,
}

impl Tag {
    pub fn new(id: TagId, name: TagName) -> Self {
        Self { id, name }
    }
}
