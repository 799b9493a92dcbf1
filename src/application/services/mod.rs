// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        ApplicationResult,
        commands::{
            certificates::CertificateCommandService, orders::OrderCommandService,
            tags::TagCommandService, users::UserCommandService,
        },
        dto::AuthenticatedUser,
        ports::{
            security::{PasswordHasher, TokenManager},
            time::Clock,
        },
        queries::{
            certificates::CertificateQueryService, orders::OrderQueryService,
            tags::TagQueryService, users::UserQueryService,
        },
    },
    domain::{
        certificate::{CertificateReadRepository, CertificateWriteRepository},
        order::OrderRepository,
        tag::{TagReconciler, TagRepository},
        user::UserRepository,
    },
};

/// Repository set the services are wired from.
#[derive(Clone)]
pub struct Repositories {
    pub certificate_read: Arc<dyn CertificateReadRepository>,
    pub certificate_write: Arc<dyn CertificateWriteRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub users: Arc<dyn UserRepository>,
}

pub struct ApplicationServices {
    pub certificate_commands: Arc<CertificateCommandService>,
    pub certificate_queries: Arc<CertificateQueryService>,
    pub tag_commands: Arc<TagCommandService>,
    pub tag_queries: Arc<TagQueryService>,
    pub order_commands: Arc<OrderCommandService>,
    pub order_queries: Arc<OrderQueryService>,
    pub user_commands: Arc<UserCommandService>,
    pub user_queries: Arc<UserQueryService>,
    token_manager: Arc<dyn TokenManager>,
}

impl ApplicationServices {
    pub fn new(
        repos: Repositories,
        password_hasher: Arc<dyn PasswordHasher>,
        token_manager: Arc<dyn TokenManager>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let tag_reconciler = Arc::new(TagReconciler::new(Arc::clone(&repos.tags)));

        let certificate_queries = Arc::new(CertificateQueryService::new(
            Arc::clone(&repos.certificate_read),
            Arc::clone(&repos.orders),
            Arc::clone(&repos.users),
        ));
        let certificate_commands = Arc::new(CertificateCommandService::new(
            Arc::clone(&repos.certificate_write),
            Arc::clone(&repos.certificate_read),
            tag_reconciler,
            Arc::clone(&clock),
        ));

        let tag_commands = Arc::new(TagCommandService::new(Arc::clone(&repos.tags)));
        let tag_queries = Arc::new(TagQueryService::new(
            Arc::clone(&repos.tags),
            Arc::clone(&repos.certificate_read),
        ));

        let order_commands = Arc::new(OrderCommandService::new(
            Arc::clone(&repos.orders),
            Arc::clone(&repos.users),
            Arc::clone(&certificate_queries),
            Arc::clone(&clock),
        ));
        let order_queries = Arc::new(OrderQueryService::new(
            Arc::clone(&repos.orders),
            Arc::clone(&repos.certificate_read),
            Arc::clone(&repos.users),
        ));

        let user_commands = Arc::new(UserCommandService::new(
            Arc::clone(&repos.users),
            password_hasher,
            Arc::clone(&token_manager),
        ));
        let user_queries = Arc::new(UserQueryService::new(
            Arc::clone(&repos.users),
            Arc::clone(&repos.orders),
            Arc::clone(&repos.certificate_read),
        ));

        Self {
            certificate_commands,
            certificate_queries,
            tag_commands,
            tag_queries,
            order_commands,
            order_queries,
            user_commands,
            user_queries,
            token_manager,
        }
    }

    pub fn token_manager(&self) -> Arc<dyn TokenManager> {
        Arc::clone(&self.token_manager)
    }

    pub async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        self.token_manager.authenticate(token).await
    }
}
