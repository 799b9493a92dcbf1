use std::sync::Arc;

use crate::{
    application::{ports::time::Clock, queries::certificates::CertificateQueryService},
    domain::{order::OrderRepository, user::UserRepository},
};

pub struct OrderCommandService {
    pub(super) order_repo: Arc<dyn OrderRepository>,
    pub(super) user_repo: Arc<dyn UserRepository>,
    pub(super) certificate_queries: Arc<CertificateQueryService>,
    pub(super) clock: Arc<dyn Clock>,
}

impl OrderCommandService {
    pub fn new(
        order_repo: Arc<dyn OrderRepository>,
        user_repo: Arc<dyn UserRepository>,
        certificate_queries: Arc<CertificateQueryService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            order_repo,
            user_repo,
            certificate_queries,
            clock,
        }
    }
}
