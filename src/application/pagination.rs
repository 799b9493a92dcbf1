// src/application/pagination.rs
//! Offset pagination over fully materialised, already ordered result lists.
use crate::application::{
    dto::Page,
    error::{ApplicationError, ApplicationResult},
};
use crate::domain::validation;

pub const DEFAULT_LIMIT: i64 = 20;
pub const DEFAULT_PAGE: i64 = 1;

/// Raw `page` / `limit` request values; `None` means "use the default".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageRequest {
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self { page, limit }
    }

    fn resolve(&self) -> ApplicationResult<(i64, i64)> {
        let limit = match self.limit {
            None => DEFAULT_LIMIT,
            Some(value) if validation::is_positive_id(value) => value,
            Some(value) => return Err(ApplicationError::invalid_parameter("limit", value)),
        };
        let page = match self.page {
            None => DEFAULT_PAGE,
            Some(value) if validation::is_positive_id(value) => value,
            Some(value) => return Err(ApplicationError::invalid_parameter("page", value)),
        };
        Ok((page, limit))
    }
}

/// Cuts one page out of `items`.
///
/// Page 1 of an empty list is an empty page; any later page that starts past
/// the end fails with `PageOutOfRange`.
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> ApplicationResult<Page<T>> {
    let (page, limit) = request.resolve()?;
    let total = items.len() as u64;
    let offset = (limit as u64).saturating_mul(page as u64 - 1);

    if offset > 0 && offset >= total {
        return Err(ApplicationError::PageOutOfRange(page));
    }

    let content: Vec<T> = items
        .into_iter()
        .skip(offset as usize)
        .take(limit as usize)
        .collect();

    Ok(Page {
        content,
        page_number: page,
        page_size: limit,
        total_elements: total,
        total_pages: total.div_ceil(limit as u64),
    })
}
