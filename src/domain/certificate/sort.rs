// src/domain/certificate/sort.rs
//! Typed ORDER BY clause for certificate listings.
//!
//! Raw input such as `"name asc, price desc"` is parsed token by token; tokens
//! that are not `<sortable field> <asc|desc>` are dropped, never rejected.
use std::cmp::Ordering;

use crate::domain::certificate::Certificate;
use crate::domain::validation;

const TOKEN_DELIMITER: &str = ", ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Description,
    Duration,
    Price,
    CreateDate,
    LastUpdateDate,
}

impl SortField {
    pub const ALL: [SortField; 6] = [
        SortField::Name,
        SortField::Description,
        SortField::Duration,
        SortField::Price,
        SortField::CreateDate,
        SortField::LastUpdateDate,
    ];

    /// Name accepted in request parameters.
    pub fn param_name(&self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Description => "description",
            SortField::Duration => "duration",
            SortField::Price => "price",
            SortField::CreateDate => "createDate",
            SortField::LastUpdateDate => "lastUpdateDate",
        }
    }

    /// Storage column backing the field.
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Description => "description",
            SortField::Duration => "duration",
            SortField::Price => "price",
            SortField::CreateDate => "created_at",
            SortField::LastUpdateDate => "updated_at",
        }
    }

    fn from_param(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.param_name() == value)
    }

    fn compare(&self, a: &Certificate, b: &Certificate) -> Ordering {
        match self {
            SortField::Name => a.name.as_str().cmp(b.name.as_str()),
            SortField::Description => a.description.as_str().cmp(b.description.as_str()),
            SortField::Duration => a.duration.cmp(&b.duration),
            SortField::Price => a.price.cmp(&b.price),
            SortField::CreateDate => a.created_at.cmp(&b.created_at),
            SortField::LastUpdateDate => a.updated_at.cmp(&b.updated_at),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }

    fn from_param(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortKey {
    fn parse(token: &str) -> Option<Self> {
        if !validation::is_name(token) {
            return None;
        }
        let (field, direction) = token.split_once(' ')?;
        Some(Self {
            field: SortField::from_param(field)?,
            direction: SortDirection::from_param(direction)?,
        })
    }
}

/// Ordered list of sort keys; empty means storage-defined order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortClause(Vec<SortKey>);

impl SortClause {
    pub fn unsorted() -> Self {
        Self::default()
    }

    pub fn parse(raw: Option<&str>) -> Self {
        let keys = raw
            .map(|raw| raw.split(TOKEN_DELIMITER).filter_map(SortKey::parse).collect())
            .unwrap_or_default();
        Self(keys)
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn compare(&self, a: &Certificate, b: &Certificate) -> Ordering {
        self.0
            .iter()
            .map(|key| match key.direction {
                SortDirection::Asc => key.field.compare(a, b),
                SortDirection::Desc => key.field.compare(b, a),
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    /// Stable in-place sort; a no-op for an empty clause.
    pub fn apply(&self, certificates: &mut [Certificate]) {
        if !self.is_empty() {
            certificates.sort_by(|a, b| self.compare(a, b));
        }
    }
}
