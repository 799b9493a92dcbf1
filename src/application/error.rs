// src/application/error.rs
use crate::domain::errors::DomainError;
use std::fmt;
use thiserror::Error;

pub type ApplicationResult<T> = Result<T, ApplicationError>;

/// One rejected field of a structured payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidField {
    pub field: String,
    pub value: String,
}

/// Every field of a payload that failed validation, in check order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvalidFields(Vec<InvalidField>);

impl InvalidFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: impl Into<String>, value: impl fmt::Display) -> Self {
        let mut fields = Self::new();
        fields.push(field, value);
        fields
    }

    pub fn push(&mut self, field: impl Into<String>, value: impl fmt::Display) {
        self.0.push(InvalidField {
            field: field.into(),
            value: value.to_string(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.iter().any(|entry| entry.field == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InvalidField> {
        self.0.iter()
    }

    /// `Err(InvalidInput)` when anything was collected.
    pub fn into_result(self) -> ApplicationResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ApplicationError::InvalidInput(self))
        }
    }
}

impl fmt::Display for InvalidFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .0
            .iter()
            .map(|entry| format!("{}='{}'", entry.field, entry.value))
            .collect();
        f.write_str(&rendered.join(", "))
    }
}

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("invalid input: {0}")]
    InvalidInput(InvalidFields),

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("duplicate resource: {0}")]
    Duplicate(String),

    #[error("page {0} does not exist")]
    PageOutOfRange(i64),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("access denied: {0}")]
    AccessDenied(String),

    #[error("infrastructure failure: {0}")]
    Infrastructure(String),
}

impl ApplicationError {
    pub fn invalid_parameter(name: &str, value: impl fmt::Display) -> Self {
        Self::InvalidParameter(format!("{name}={value}"))
    }

    pub fn invalid_field(field: impl Into<String>, value: impl fmt::Display) -> Self {
        Self::InvalidInput(InvalidFields::single(field, value))
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn duplicate(msg: impl Into<String>) -> Self {
        Self::Duplicate(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn access_denied(msg: impl Into<String>) -> Self {
        Self::AccessDenied(msg.into())
    }

    pub fn infrastructure(msg: impl Into<String>) -> Self {
        Self::Infrastructure(msg.into())
    }
}

impl From<DomainError> for ApplicationError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::Validation(msg) => Self::InvalidParameter(msg),
            DomainError::Conflict(msg) => Self::Duplicate(msg),
            DomainError::NotFound(msg) => Self::NotFound(msg),
            DomainError::Persistence(msg) => Self::Infrastructure(msg),
        }
    }
}
