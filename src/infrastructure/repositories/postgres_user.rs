// src/infrastructure/repositories/postgres_user.rs
use super::map_sqlx;
use crate::domain::certificate::CertificateId;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::{
    Email, NewUser, PasswordHash, PersonName, Role, User, UserId, UserRepository, UserUpdate,
};
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

const USER_COLUMNS: &str = "id, first_name, last_name, email, password_hash, role";

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    first_name: String,
    last_name: String,
    email: String,
    password_hash: String,
    role: String,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId::new(row.id)?,
            first_name: PersonName::new(row.first_name)?,
            last_name: PersonName::new(row.last_name)?,
            email: Email::new(row.email)?,
            password_hash: PasswordHash::new(row.password_hash)?,
            role: row.role.parse::<Role>()?,
        })
    }
}

fn into_users(rows: Vec<UserRow>) -> DomainResult<Vec<User>> {
    rows.into_iter().map(User::try_from).collect()
}

impl PostgresUserRepository {
    async fn fetch_where(&self, condition: &str, value: String) -> DomainResult<Vec<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {condition} ORDER BY id");
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .bind(value)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;
        into_users(rows)
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, UserRow>(&sql)
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .map(User::try_from)
            .transpose()
    }

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<User>> {
        Ok(self
            .fetch_where("email = $1", email.as_str().to_owned())
            .await?
            .into_iter()
            .next())
    }

    async fn list(&self) -> DomainResult<Vec<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY id");
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;
        into_users(rows)
    }

    async fn find_by_first_name(&self, first_name: &PersonName) -> DomainResult<Vec<User>> {
        self.fetch_where("first_name = $1", first_name.as_str().to_owned())
            .await
    }

    async fn find_by_last_name(&self, last_name: &PersonName) -> DomainResult<Vec<User>> {
        self.fetch_where("last_name = $1", last_name.as_str().to_owned())
            .await
    }

    async fn find_by_full_name(
        &self,
        first_name: &PersonName,
        last_name: &PersonName,
    ) -> DomainResult<Vec<User>> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE first_name = $1 AND last_name = $2 ORDER BY id"
        );
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .bind(first_name.as_str())
            .bind(last_name.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;
        into_users(rows)
    }

    async fn find_by_certificate_id(&self, id: CertificateId) -> DomainResult<Vec<User>> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id IN (
                 SELECT o.user_id FROM orders o
                 JOIN order_certificates oc ON oc.order_id = o.id
                 WHERE oc.certificate_id = $1)
             ORDER BY id"
        );
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .bind(i64::from(id))
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;
        into_users(rows)
    }

    async fn insert(&self, new_user: NewUser) -> DomainResult<User> {
        let NewUser {
            first_name,
            last_name,
            email,
            password_hash,
            role,
        } = new_user;

        let sql = format!(
            "INSERT INTO users (first_name, last_name, email, password_hash, role)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(first_name.as_str())
            .bind(last_name.as_str())
            .bind(email.as_str())
            .bind(password_hash.as_str())
            .bind(role.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        User::try_from(row)
    }

    async fn update(&self, update: UserUpdate) -> DomainResult<User> {
        let sql = format!(
            "UPDATE users SET role = COALESCE($2, role) WHERE id = $1 RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(i64::from(update.id))
            .bind(update.role.map(|role| role.as_str()))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::not_found("user not found"))?;

        User::try_from(row)
    }
}
