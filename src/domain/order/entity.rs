// src/domain/order/entity.rs
use crate::domain::certificate::{Certificate, CertificateId};
use crate::domain::order::value_objects::OrderId;
use crate::domain::user::UserId;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};

/// A purchase. Every field is fixed at creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub cost: BigDecimal,
    pub created_at: DateTime<Utc>,
    pub user_id: UserId,
    /// Purchased certificates in purchase order; repeats are allowed.
    pub certificate_ids: Vec<CertificateId>,
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub cost: BigDecimal,
    pub created_at: DateTime<Utc>,
    pub user_id: UserId,
    pub certificate_ids: Vec<CertificateId>,
}

impl NewOrder {
    /// Snapshots the summed price of `certificates`.
    pub fn purchase(user_id: UserId, certificates: &[Certificate], created_at: DateTime<Utc>) -> Self {
        let cost = certificates
            .iter()
            .fold(BigDecimal::from(0), |total, certificate| {
                total + certificate.price.as_decimal()
            });
        Self {
            cost,
            created_at,
            user_id,
            certificate_ids: certificates.iter().map(|c| c.id).collect(),
        }
    }
}
