// src/application/queries/orders/search.rs
use bigdecimal::{BigDecimal, ToPrimitive};
use chrono::NaiveDate;
use std::str::FromStr;

use super::OrderQueryService;
use crate::{
    application::{
        commands::ensure_capability,
        dto::{AuthenticatedUser, OrderDto, Page},
        error::{ApplicationError, ApplicationResult},
        pagination::{PageRequest, paginate},
    },
    domain::{
        order::{Order, OrderFilter, RangeBound},
        user::UserId,
        validation,
    },
};

#[derive(Debug, Clone, Default)]
pub struct SearchOrdersQuery {
    pub user_id: Option<i64>,
    /// Decimal strings. One value: upper bound. Two values: inclusive lower
    /// and upper bound.
    pub cost: Vec<String>,
    /// `20YY-MM-DD` values, same bound semantics as `cost`.
    pub create_date: Vec<String>,
    pub page: PageRequest,
}

impl OrderQueryService {
    /// User lookup, then cost/date filter, then every order.
    pub async fn search_orders(
        &self,
        actor: &AuthenticatedUser,
        query: SearchOrdersQuery,
    ) -> ApplicationResult<Page<OrderDto>> {
        ensure_capability(actor, "orders", "read")?;
        let orders = self.plan_search(&query).await?;
        Ok(paginate(orders, query.page)?.map(OrderDto::from))
    }

    async fn plan_search(&self, query: &SearchOrdersQuery) -> ApplicationResult<Vec<Order>> {
        if let Some(raw) = query.user_id {
            let user_id =
                UserId::new(raw).map_err(|_| ApplicationError::invalid_parameter("user_id", raw))?;
            return Ok(self.order_repo.find_by_user_id(user_id).await?);
        }

        if !query.cost.is_empty() || !query.create_date.is_empty() {
            let filter = build_filter(&query.cost, &query.create_date);
            if filter.is_empty() {
                tracing::debug!("every order filter value was rejected");
                return Ok(Vec::new());
            }
            return Ok(self.order_repo.find_by_filter(&filter).await?);
        }

        Ok(self.order_repo.list().await?)
    }
}

/// A field is dropped as a whole when any of its values is invalid.
fn build_filter(costs: &[String], dates: &[String]) -> OrderFilter {
    let cost = parse_costs(costs).and_then(|costs| RangeBound::from_values(&costs));
    let created = parse_dates(dates).and_then(|dates| RangeBound::from_values(&dates));

    OrderFilter { cost, created }
}

fn parse_costs(raw: &[String]) -> Option<Vec<BigDecimal>> {
    raw.iter()
        .map(|value| {
            let cost = BigDecimal::from_str(value.trim()).ok()?;
            let whole = cost.with_scale(0).to_i64()?;
            validation::is_positive_id(whole).then_some(cost)
        })
        .collect()
}

fn parse_dates(raw: &[String]) -> Option<Vec<NaiveDate>> {
    raw.iter()
        .map(|value| {
            if !validation::is_iso_date(value) {
                return None;
            }
            NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: &str) -> BigDecimal {
        BigDecimal::from_str(value).unwrap()
    }

    fn costs(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn single_cost_is_upper_bound() {
        let filter = build_filter(&costs(&["50.75"]), &[]);
        assert_eq!(filter.cost, Some(RangeBound::AtMost(dec("50.75"))));
        assert_eq!(filter.created, None);
    }

    #[test]
    fn invalid_cost_drops_only_that_field() {
        let filter = build_filter(&costs(&["0.40", "20"]), &["2022-01-01".to_owned()]);
        assert_eq!(filter.cost, None);
        assert_eq!(
            filter.created,
            NaiveDate::from_ymd_opt(2022, 1, 1).map(RangeBound::AtMost)
        );
    }

    #[test]
    fn unparseable_cost_drops_the_field() {
        let filter = build_filter(&costs(&["cheap"]), &[]);
        assert!(filter.is_empty());
    }

    #[test]
    fn impossible_calendar_date_is_rejected() {
        let filter = build_filter(&[], &["2022-02-30".to_owned()]);
        assert!(filter.is_empty());
        let filter = build_filter(&[], &["22-02-10".to_owned()]);
        assert!(filter.is_empty());
    }

    #[test]
    fn two_dates_form_inclusive_range() {
        let filter = build_filter(&[], &["2022-01-01".to_owned(), "2022-01-31".to_owned()]);
        assert_eq!(
            filter.created,
            Some(RangeBound::Between(
                NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2022, 1, 31).unwrap(),
            ))
        );
    }
}
