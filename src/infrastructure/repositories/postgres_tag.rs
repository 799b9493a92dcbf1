// src/infrastructure/repositories/postgres_tag.rs
use super::map_sqlx;
use crate::domain::certificate::CertificateId;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::tag::{Tag, TagId, TagName, TagRepository};
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

/// Spend per user, the top spender(s), tag usage across their purchases
/// (repeat purchases count every time), then every tag at the highest count.
const MOST_USED_BY_TOP_SPENDERS: &str = "
    WITH spend AS (
        SELECT user_id, SUM(cost) AS total FROM orders GROUP BY user_id
    ),
    top_users AS (
        SELECT user_id FROM spend WHERE total = (SELECT MAX(total) FROM spend)
    ),
    tag_usage AS (
        SELECT ct.tag_id, COUNT(*) AS uses
        FROM orders o
        JOIN order_certificates oc ON oc.order_id = o.id
        JOIN certificate_tags ct ON ct.certificate_id = oc.certificate_id
        WHERE o.user_id IN (SELECT user_id FROM top_users)
        GROUP BY ct.tag_id
    )
    SELECT t.id, t.name
    FROM tag_usage u
    JOIN tags t ON t.id = u.tag_id
    WHERE u.uses = (SELECT MAX(uses) FROM tag_usage)
    ORDER BY t.name";

#[derive(Clone)]
pub struct PostgresTagRepository {
    pool: PgPool,
}

impl PostgresTagRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TagRow {
    id: i64,
    name: String,
}

impl TryFrom<TagRow> for Tag {
    type Error = DomainError;

    fn try_from(row: TagRow) -> Result<Self, Self::Error> {
        Ok(Tag::new(TagId::new(row.id)?, TagName::new(row.name)?))
    }
}

fn into_tags(rows: Vec<TagRow>) -> DomainResult<Vec<Tag>> {
    rows.into_iter().map(Tag::try_from).collect()
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn find_by_id(&self, id: TagId) -> DomainResult<Option<Tag>> {
        sqlx::query_as::<_, TagRow>("SELECT id, name FROM tags WHERE id = $1")
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .map(Tag::try_from)
            .transpose()
    }

    async fn find_by_name(&self, name: &TagName) -> DomainResult<Option<Tag>> {
        sqlx::query_as::<_, TagRow>("SELECT id, name FROM tags WHERE name = $1")
            .bind(name.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .map(Tag::try_from)
            .transpose()
    }

    async fn list(&self) -> DomainResult<Vec<Tag>> {
        let rows = sqlx::query_as::<_, TagRow>("SELECT id, name FROM tags ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;
        into_tags(rows)
    }

    async fn find_by_certificate_id(&self, id: CertificateId) -> DomainResult<Vec<Tag>> {
        let rows = sqlx::query_as::<_, TagRow>(
            "SELECT t.id, t.name FROM tags t
             JOIN certificate_tags ct ON ct.tag_id = t.id
             WHERE ct.certificate_id = $1
             ORDER BY t.name",
        )
        .bind(i64::from(id))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;
        into_tags(rows)
    }

    async fn insert(&self, name: TagName) -> DomainResult<Tag> {
        let row = sqlx::query_as::<_, TagRow>(
            "INSERT INTO tags (name) VALUES ($1) RETURNING id, name",
        )
        .bind(name.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;
        Tag::try_from(row)
    }

    async fn delete(&self, id: TagId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("tag not found"));
        }
        Ok(())
    }

    async fn most_used_by_top_spenders(&self) -> DomainResult<Vec<Tag>> {
        let rows = sqlx::query_as::<_, TagRow>(MOST_USED_BY_TOP_SPENDERS)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;
        into_tags(rows)
    }
}
