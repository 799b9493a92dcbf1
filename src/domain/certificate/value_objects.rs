use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::validation;
use bigdecimal::BigDecimal;
use once_cell::sync::Lazy;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CertificateId(pub i64);

impl CertificateId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if !validation::is_positive_id(id) {
            Err(DomainError::validation("certificate id must be positive"))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<CertificateId> for i64 {
    fn from(value: CertificateId) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CertificateName(String);

impl CertificateName {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if !validation::is_name(&value) {
            return Err(DomainError::validation(
                "certificate name must be 2-100 word characters, spaces or dashes",
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CertificateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Description(String);

impl Description {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if !validation::is_description(&value) {
            return Err(DomainError::validation(
                "description must be 3-300 characters without '<' or '>'",
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

static MAX_PRICE: Lazy<BigDecimal> = Lazy::new(|| BigDecimal::from(10_000));

/// Exact decimal price between 0.00 and 10000.00 inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Price(BigDecimal);

impl Price {
    pub fn new(value: BigDecimal) -> DomainResult<Self> {
        if !Self::in_range(&value) {
            return Err(DomainError::validation(
                "price must be between 0.00 and 10000.00",
            ));
        }
        Ok(Self(value))
    }

    pub fn in_range(value: &BigDecimal) -> bool {
        *value >= BigDecimal::from(0) && *value <= *MAX_PRICE
    }

    pub fn as_decimal(&self) -> &BigDecimal {
        &self.0
    }

    pub fn into_inner(self) -> BigDecimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validity period in days, 1 to 180.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Duration(i32);

impl Duration {
    pub const MIN_DAYS: i32 = 1;
    pub const MAX_DAYS: i32 = 180;

    pub fn new(days: i32) -> DomainResult<Self> {
        if !Self::in_range(days) {
            return Err(DomainError::validation(
                "duration must be between 1 and 180 days",
            ));
        }
        Ok(Self(days))
    }

    pub fn in_range(days: i32) -> bool {
        (Self::MIN_DAYS..=Self::MAX_DAYS).contains(&days)
    }

    pub fn days(&self) -> i32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn price_bounds() {
        assert!(Price::new(BigDecimal::from(0)).is_ok());
        assert!(Price::new(BigDecimal::from_str("10000.00").unwrap()).is_ok());
        assert!(Price::new(BigDecimal::from_str("10000.01").unwrap()).is_err());
        assert!(Price::new(BigDecimal::from_str("-0.01").unwrap()).is_err());
    }

    #[test]
    fn duration_bounds() {
        assert!(Duration::new(1).is_ok());
        assert!(Duration::new(180).is_ok());
        assert!(Duration::new(0).is_err());
        assert!(Duration::new(181).is_err());
    }
}
