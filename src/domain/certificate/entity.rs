// src/domain/certificate/entity.rs
use crate::domain::certificate::value_objects::{
    CertificateId, CertificateName, Description, Duration, Price,
};
use crate::domain::tag::{ResolvedTag, Tag};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct Certificate {
    pub id: CertificateId,
    pub name: CertificateName,
    pub description: Description,
    pub price: Price,
    pub duration: Duration,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Ordered by tag name.
    pub tags: Vec<Tag>,
}

impl Certificate {
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|tag| tag.name.as_str() == name)
    }

    /// Substring match against name or description, case as stored.
    pub fn mentions(&self, fragment: &str) -> bool {
        self.name.as_str().contains(fragment) || self.description.as_str().contains(fragment)
    }

    pub fn is_same_offer(&self, name: &CertificateName, description: &Description) -> bool {
        &self.name == name && &self.description == description
    }
}

#[derive(Debug, Clone)]
pub struct NewCertificate {
    pub name: CertificateName,
    pub description: Description,
    pub price: Price,
    pub duration: Duration,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tags: Vec<ResolvedTag>,
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone)]
pub struct CertificateUpdate {
    pub id: CertificateId,
    pub name: Option<CertificateName>,
    pub description: Option<Description>,
    pub price: Option<Price>,
    pub duration: Option<Duration>,
    pub tags: Option<Vec<ResolvedTag>>,
    pub updated_at: DateTime<Utc>,
}

impl CertificateUpdate {
    pub fn new(id: CertificateId, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: None,
            description: None,
            price: None,
            duration: None,
            tags: None,
            updated_at,
        }
    }

    pub fn with_name(mut self, name: CertificateName) -> Self {
        self.name = Some(name);
        self
    }

    pub fn with_description(mut self, description: Description) -> Self {
        self.description = Some(description);
        self
    }

    pub fn with_price(mut self, price: Price) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn with_tags(mut self, tags: Vec<ResolvedTag>) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn has_changes(&self) -> bool {
        self.name.is_some()
            || self.description.is_some()
            || self.price.is_some()
            || self.duration.is_some()
            || self.tags.is_some()
    }
}
