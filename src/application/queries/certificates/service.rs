use std::sync::Arc;

use crate::domain::{
    certificate::CertificateReadRepository, order::OrderRepository, user::UserRepository,
};

pub struct CertificateQueryService {
    pub(super) read_repo: Arc<dyn CertificateReadRepository>,
    pub(super) order_repo: Arc<dyn OrderRepository>,
    pub(super) user_repo: Arc<dyn UserRepository>,
}

impl CertificateQueryService {
    pub fn new(
        read_repo: Arc<dyn CertificateReadRepository>,
        order_repo: Arc<dyn OrderRepository>,
        user_repo: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            read_repo,
            order_repo,
            user_repo,
        }
    }
}
