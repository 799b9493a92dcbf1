use std::sync::Arc;

use crate::domain::{
    certificate::CertificateReadRepository, order::OrderRepository, user::UserRepository,
};

pub struct UserQueryService {
    pub(super) user_repo: Arc<dyn UserRepository>,
    pub(super) order_repo: Arc<dyn OrderRepository>,
    pub(super) certificate_repo: Arc<dyn CertificateReadRepository>,
}

impl UserQueryService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        order_repo: Arc<dyn OrderRepository>,
        certificate_repo: Arc<dyn CertificateReadRepository>,
    ) -> Self {
        Self {
            user_repo,
            order_repo,
            certificate_repo,
        }
    }
}
