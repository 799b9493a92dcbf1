use std::sync::Arc;

use crate::domain::tag::TagRepository;

pub struct TagCommandService {
    pub(super) tag_repo: Arc<dyn TagRepository>,
}

impl TagCommandService {
    pub fn new(tag_repo: Arc<dyn TagRepository>) -> Self {
        Self { tag_repo }
    }
}
