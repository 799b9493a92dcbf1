use std::sync::Arc;

use crate::domain::{
    certificate::CertificateReadRepository, order::OrderRepository, user::UserRepository,
};

pub struct OrderQueryService {
    pub(super) order_repo: Arc<dyn OrderRepository>,
    pub(super) certificate_repo: Arc<dyn CertificateReadRepository>,
    pub(super) user_repo: Arc<dyn UserRepository>,
}

impl OrderQueryService {
    pub fn new(
        order_repo: Arc<dyn OrderRepository>,
        certificate_repo: Arc<dyn CertificateReadRepository>,
        user_repo: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            order_repo,
            certificate_repo,
            user_repo,
        }
    }
}
