use crate::domain::order::Order;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub id: i64,
    #[schema(value_type = String, example = "99.80")]
    pub cost: BigDecimal,
    pub create_date: DateTime<Utc>,
    pub user_id: i64,
    /// In purchase order, repeats included.
    pub certificate_ids: Vec<i64>,
}

impl From<Order> for OrderDto {
    fn from(order: Order) -> Self {
        Self {
            id: order.id.into(),
            cost: order.cost,
            create_date: order.created_at,
            user_id: order.user_id.into(),
            certificate_ids: order.certificate_ids.into_iter().map(i64::from).collect(),
        }
    }
}
