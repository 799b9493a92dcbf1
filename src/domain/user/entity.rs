// src/domain/user/entity.rs
use crate::domain::user::value_objects::{Email, PasswordHash, PersonName, Role, UserId};

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: Email,
    pub password_hash: PasswordHash,
    pub role: Role,
}

impl User {
    pub fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: Email,
    pub password_hash: PasswordHash,
    pub role: Role,
}

impl NewUser {
    /// Self-registered accounts always start with the `USER` role.
    pub fn register(
        first_name: PersonName,
        last_name: PersonName,
        email: Email,
        password_hash: PasswordHash,
    ) -> Self {
        Self {
            first_name,
            last_name,
            email,
            password_hash,
            role: Role::User,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub id: UserId,
    pub role: Option<Role>,
}

impl UserUpdate {
    pub fn new(id: UserId) -> Self {
        Self { id, role: None }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }
}
