// tests/support/mocks/security.rs
use async_trait::async_trait;
use chrono::Duration;

use certshop::application::ApplicationResult;
use certshop::application::dto::{AuthTokenDto, AuthenticatedUser, TokenSubject};
use certshop::application::error::ApplicationError;
use certshop::application::ports::security::{PasswordHasher, TokenManager};
use certshop::domain::user::{Role, UserId};

use super::time::fixed_now;

pub const ADMIN_TOKEN: &str = "admin-token";
pub const CUSTOMER_TOKEN: &str = "customer-token";

pub const ADMIN_EMAIL: &str = "admin@mail.com";
pub const CUSTOMER_EMAIL: &str = "alice@mail.com";

pub fn principal(id: i64, email: &str, role: Role) -> AuthenticatedUser {
    let now = fixed_now();
    AuthenticatedUser {
        id: UserId(id),
        email: email.to_string(),
        role,
        capabilities: role.default_capabilities(),
        issued_at: now,
        expires_at: now + Duration::hours(1),
    }
}

/* -------------------------------- TokenManager -------------------------------- */

/// Knows two fixed tokens; `issue` hands out `token-for-<id>`.
#[derive(Clone, Debug)]
pub struct StaticTokenManager {
    pub admin_id: i64,
    pub customer_id: i64,
}

#[async_trait]
impl TokenManager for StaticTokenManager {
    async fn issue(&self, subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
        let now = fixed_now();
        Ok(AuthTokenDto {
            token: format!("token-for-{}", subject.user_id.0),
            issued_at: now,
            expires_at: now + Duration::hours(1),
            expires_in: 3600,
        })
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        match token {
            ADMIN_TOKEN => Ok(principal(self.admin_id, ADMIN_EMAIL, Role::Admin)),
            CUSTOMER_TOKEN => Ok(principal(self.customer_id, CUSTOMER_EMAIL, Role::User)),
            _ => Err(ApplicationError::unauthorized("invalid token")),
        }
    }
}

/* -------------------------------- PasswordHasher -------------------------------- */

/// Reversible "hash" so tests can seed users with known passwords.
#[derive(Clone, Debug, Default)]
pub struct PlainPasswordHasher;

pub fn plain_hash(password: &str) -> String {
    format!("plain${password}")
}

#[async_trait]
impl PasswordHasher for PlainPasswordHasher {
    async fn hash(&self, password: &str) -> ApplicationResult<String> {
        Ok(plain_hash(password))
    }

    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()> {
        if plain_hash(password) == expected_hash {
            Ok(())
        } else {
            Err(ApplicationError::unauthorized("invalid credentials"))
        }
    }
}
