// src/infrastructure/repositories/postgres_order.rs
use super::{CNT_ORDER_CERTIFICATE, constraint_name, map_sqlx};
use crate::domain::certificate::CertificateId;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::order::{NewOrder, Order, OrderFilter, OrderId, OrderRepository, RangeBound};
use crate::domain::user::UserId;
use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use sqlx::{Encode, FromRow, PgPool, Postgres, QueryBuilder, Type};
use std::collections::HashMap;

const SELECT_ORDERS: &str = "SELECT o.id, o.cost, o.created_at, o.user_id FROM orders o";

#[derive(Clone)]
pub struct PostgresOrderRepository {
    pool: PgPool,
}

impl PostgresOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct OrderRow {
    id: i64,
    cost: BigDecimal,
    created_at: DateTime<Utc>,
    user_id: i64,
}

#[derive(Debug, FromRow)]
struct OrderItemRow {
    order_id: i64,
    certificate_id: i64,
}

impl OrderRow {
    fn into_order(self, certificate_ids: Vec<CertificateId>) -> DomainResult<Order> {
        Ok(Order {
            id: OrderId::new(self.id)?,
            cost: self.cost,
            created_at: self.created_at,
            user_id: UserId::new(self.user_id)?,
            certificate_ids,
        })
    }
}

fn push_bound<'a, T>(
    builder: &mut QueryBuilder<'a, Postgres>,
    column: &str,
    bound: RangeBound<T>,
) where
    T: 'a + Encode<'a, Postgres> + Type<Postgres> + Send,
{
    builder.push(column);
    match bound {
        RangeBound::AtMost(upper) => {
            builder.push(" <= ");
            builder.push_bind(upper);
        }
        RangeBound::Between(lower, upper) => {
            builder.push(" BETWEEN ");
            builder.push_bind(lower);
            builder.push(" AND ");
            builder.push_bind(upper);
        }
    }
}

impl PostgresOrderRepository {
    async fn fetch(&self, mut builder: QueryBuilder<'_, Postgres>) -> DomainResult<Vec<Order>> {
        let rows = builder
            .build_query_as::<OrderRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        let items = sqlx::query_as::<_, OrderItemRow>(
            "SELECT order_id, certificate_id FROM order_certificates
             WHERE order_id = ANY($1)
             ORDER BY order_id, position",
        )
        .bind(&ids[..])
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        let mut by_order: HashMap<i64, Vec<CertificateId>> = HashMap::new();
        for item in items {
            by_order
                .entry(item.order_id)
                .or_default()
                .push(CertificateId::new(item.certificate_id)?);
        }

        rows.into_iter()
            .map(|row| {
                let certificate_ids = by_order.remove(&row.id).unwrap_or_default();
                row.into_order(certificate_ids)
            })
            .collect()
    }
}

/// A line whose certificate was deleted after the order was priced.
fn missing_certificate(constraint: Option<&str>, id: CertificateId) -> Option<DomainError> {
    (constraint == Some(CNT_ORDER_CERTIFICATE))
        .then(|| DomainError::not_found(format!("certificate {} not found", id.0)))
}

fn map_line_error(err: sqlx::Error, id: CertificateId) -> DomainError {
    missing_certificate(constraint_name(&err), id).unwrap_or_else(|| map_sqlx(err))
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn find_by_id(&self, id: OrderId) -> DomainResult<Option<Order>> {
        let mut builder = QueryBuilder::new(SELECT_ORDERS);
        builder.push(" WHERE o.id = ");
        builder.push_bind(i64::from(id));
        Ok(self.fetch(builder).await?.into_iter().next())
    }

    async fn list(&self) -> DomainResult<Vec<Order>> {
        let mut builder = QueryBuilder::new(SELECT_ORDERS);
        builder.push(" ORDER BY o.id");
        self.fetch(builder).await
    }

    async fn find_by_user_id(&self, user_id: UserId) -> DomainResult<Vec<Order>> {
        let mut builder = QueryBuilder::new(SELECT_ORDERS);
        builder.push(" WHERE o.user_id = ");
        builder.push_bind(i64::from(user_id));
        builder.push(" ORDER BY o.id");
        self.fetch(builder).await
    }

    async fn find_by_filter(&self, filter: &OrderFilter) -> DomainResult<Vec<Order>> {
        let mut builder = QueryBuilder::new(SELECT_ORDERS);
        builder.push(" WHERE TRUE");
        if let Some(cost) = filter.cost.clone() {
            builder.push(" AND ");
            push_bound(&mut builder, "o.cost", cost);
        }
        if let Some(created) = filter.created.clone() {
            builder.push(" AND ");
            push_bound(&mut builder, "(o.created_at AT TIME ZONE 'UTC')::date", created);
        }
        builder.push(" ORDER BY o.id");
        self.fetch(builder).await
    }

    async fn find_by_certificate_id(&self, id: CertificateId) -> DomainResult<Vec<Order>> {
        let mut builder = QueryBuilder::new(SELECT_ORDERS);
        builder.push(" WHERE o.id IN (SELECT order_id FROM order_certificates WHERE certificate_id = ");
        builder.push_bind(i64::from(id));
        builder.push(") ORDER BY o.id");
        self.fetch(builder).await
    }

    async fn insert(&self, order: NewOrder) -> DomainResult<Order> {
        let NewOrder {
            cost,
            created_at,
            user_id,
            certificate_ids,
        } = order;

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO orders (cost, created_at, user_id) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(cost)
        .bind(created_at)
        .bind(i64::from(user_id))
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        for (position, certificate_id) in certificate_ids.iter().enumerate() {
            sqlx::query(
                "INSERT INTO order_certificates (order_id, position, certificate_id)
                 VALUES ($1, $2, $3)",
            )
            .bind(id)
            .bind(position as i32)
            .bind(i64::from(*certificate_id))
            .execute(&mut *tx)
            .await
            .map_err(|err| map_line_error(err, *certificate_id))?;
        }
        tx.commit().await.map_err(map_sqlx)?;

        self.find_by_id(OrderId(id))
            .await?
            .ok_or_else(|| DomainError::not_found("order not found"))
    }

    async fn delete(&self, id: OrderId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("order not found"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vanished_certificate_on_insert_is_not_found() {
        let err = missing_certificate(Some(CNT_ORDER_CERTIFICATE), CertificateId(7));
        assert!(matches!(err, Some(DomainError::NotFound(msg)) if msg == "certificate 7 not found"));
    }

    #[test]
    fn other_line_errors_use_the_shared_mapping() {
        assert!(missing_certificate(Some("orders_user_id_fkey"), CertificateId(7)).is_none());
        assert!(missing_certificate(None, CertificateId(7)).is_none());
        let err = map_line_error(sqlx::Error::RowNotFound, CertificateId(7));
        assert!(matches!(err, DomainError::Persistence(_)));
    }
}
