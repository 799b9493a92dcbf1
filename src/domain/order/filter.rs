// src/domain/order/filter.rs
//! Conjunctive cost / creation-date filter for order searches.
use bigdecimal::BigDecimal;
use chrono::NaiveDate;

use crate::domain::order::Order;

/// One supplied value is an upper bound, two form an inclusive range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeBound<T> {
    AtMost(T),
    Between(T, T),
}

impl<T: PartialOrd + Clone> RangeBound<T> {
    /// Builds a bound from the first one or two values; extra values are ignored.
    pub fn from_values(values: &[T]) -> Option<Self> {
        match values {
            [] => None,
            [upper] => Some(RangeBound::AtMost(upper.clone())),
            [lower, upper, ..] => Some(RangeBound::Between(lower.clone(), upper.clone())),
        }
    }

    pub fn contains(&self, value: &T) -> bool {
        match self {
            RangeBound::AtMost(upper) => value <= upper,
            RangeBound::Between(lower, upper) => value >= lower && value <= upper,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub cost: Option<RangeBound<BigDecimal>>,
    /// Compared against the calendar date of the order's creation instant (UTC).
    pub created: Option<RangeBound<NaiveDate>>,
}

impl OrderFilter {
    pub fn is_empty(&self) -> bool {
        self.cost.is_none() && self.created.is_none()
    }

    pub fn matches(&self, order: &Order) -> bool {
        let cost_ok = self
            .cost
            .as_ref()
            .is_none_or(|bound| bound.contains(&order.cost));
        let date_ok = self
            .created
            .as_ref()
            .is_none_or(|bound| bound.contains(&order.created_at.date_naive()));
        cost_ok && date_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::OrderId;
    use crate::domain::user::UserId;
    use chrono::{TimeZone, Utc};

    fn order(cost: i64, day: u32) -> Order {
        Order {
            id: OrderId(1),
            cost: BigDecimal::from(cost),
            created_at: Utc.with_ymd_and_hms(2022, 3, day, 12, 0, 0).unwrap(),
            user_id: UserId(1),
            certificate_ids: vec![],
        }
    }

    #[test]
    fn single_value_is_upper_bound() {
        let bound = RangeBound::from_values(&[BigDecimal::from(50)]).unwrap();
        assert_eq!(bound, RangeBound::AtMost(BigDecimal::from(50)));
        assert!(bound.contains(&BigDecimal::from(50)));
        assert!(!bound.contains(&BigDecimal::from(51)));
    }

    #[test]
    fn two_values_are_inclusive_range() {
        let bound = RangeBound::from_values(&[10, 20, 99]).unwrap();
        assert_eq!(bound, RangeBound::Between(10, 20));
        assert!(bound.contains(&10));
        assert!(bound.contains(&20));
        assert!(!bound.contains(&21));
        assert!(RangeBound::<i32>::from_values(&[]).is_none());
    }

    #[test]
    fn filter_is_conjunctive() {
        let filter = OrderFilter {
            cost: Some(RangeBound::AtMost(BigDecimal::from(100))),
            created: Some(RangeBound::Between(
                NaiveDate::from_ymd_opt(2022, 3, 1).unwrap(),
                NaiveDate::from_ymd_opt(2022, 3, 10).unwrap(),
            )),
        };
        assert!(filter.matches(&order(80, 10)));
        assert!(!filter.matches(&order(80, 11)));
        assert!(!filter.matches(&order(120, 5)));
        assert!(OrderFilter::default().is_empty());
    }
}
