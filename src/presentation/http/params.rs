// src/presentation/http/params.rs
//! Flat query-string bag. Keys may repeat (`cost=10&cost=50`), which the
//! struct-based `Query` extractor cannot express.
use crate::application::{error::ApplicationError, pagination::PageRequest};
use axum::{extract::FromRequestParts, http::request::Parts};

use super::error::HttpError;

#[derive(Debug, Clone, Default)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn parse(raw: Option<&str>) -> Result<Self, ApplicationError> {
        let Some(raw) = raw else {
            return Ok(Self::default());
        };
        serde_urlencoded::from_str::<Vec<(String, String)>>(raw)
            .map(Self)
            .map_err(|_| ApplicationError::invalid_parameter("query", raw))
    }

    /// All values for `key`, in request order. Blank values are kept so the
    /// search planners can reject them.
    pub fn all(&self, key: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
            .collect()
    }

    pub fn first(&self, key: &str) -> Option<&str> {
        self.all(key).into_iter().next()
    }

    pub fn text(&self, key: &str) -> Option<String> {
        self.first(key).map(str::to_string)
    }

    /// `InvalidParameter` when the value is present but not an integer. A
    /// blank value counts as absent.
    pub fn int(&self, key: &str) -> Result<Option<i64>, ApplicationError> {
        self.first(key)
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| {
                raw.trim()
                    .parse::<i64>()
                    .map_err(|_| ApplicationError::invalid_parameter(key, raw))
            })
            .transpose()
    }

    pub fn page(&self) -> Result<PageRequest, ApplicationError> {
        Ok(PageRequest::new(self.int("page")?, self.int("limit")?))
    }
}

impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::parse(parts.uri.query()).map_err(HttpError::from_error)
    }
}
