// src/infrastructure/repositories/postgres_certificate.rs
use super::map_sqlx;
use crate::domain::certificate::{
    Certificate, CertificateId, CertificateName, CertificateReadRepository, CertificateUpdate,
    CertificateWriteRepository, Description, Duration, NewCertificate, Price, SortClause,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::tag::{ResolvedTag, Tag, TagId, TagName};
use crate::domain::user::UserId;
use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, Transaction};
use std::collections::{BTreeSet, HashMap};

const SELECT_CERTIFICATES: &str = "SELECT c.id, c.name, c.description, c.price, c.duration, \
     c.created_at, c.updated_at FROM certificates c";

#[derive(Clone)]
pub struct PostgresCertificateRepository {
    pool: PgPool,
}

impl PostgresCertificateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CertificateRow {
    id: i64,
    name: String,
    description: String,
    price: BigDecimal,
    duration: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct PurgedTagRow {
    id: i64,
    name: String,
}

#[derive(Debug, FromRow)]
struct CertificateTagRow {
    certificate_id: i64,
    tag_id: i64,
    tag_name: String,
}

impl CertificateRow {
    fn into_certificate(self, tags: Vec<Tag>) -> DomainResult<Certificate> {
        Ok(Certificate {
            id: CertificateId::new(self.id)?,
            name: CertificateName::new(self.name)?,
            description: Description::new(self.description)?,
            price: Price::new(self.price)?,
            duration: Duration::new(self.duration)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
            tags,
        })
    }
}

impl PostgresCertificateRepository {
    fn select<'a>() -> QueryBuilder<'a, Postgres> {
        QueryBuilder::new(SELECT_CERTIFICATES)
    }

    /// Sort columns come from the typed whitelist; `c.id` breaks ties.
    fn push_order_by(builder: &mut QueryBuilder<'_, Postgres>, sort: &SortClause) {
        builder.push(" ORDER BY ");
        for key in sort.keys() {
            builder.push("c.");
            builder.push(key.field.column());
            builder.push(" ");
            builder.push(key.direction.as_sql());
            builder.push(", ");
        }
        builder.push("c.id");
    }

    async fn fetch(&self, mut builder: QueryBuilder<'_, Postgres>) -> DomainResult<Vec<Certificate>> {
        let rows = builder
            .build_query_as::<CertificateRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;
        self.attach_tags(rows).await
    }

    async fn attach_tags(&self, rows: Vec<CertificateRow>) -> DomainResult<Vec<Certificate>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        let tag_rows = sqlx::query_as::<_, CertificateTagRow>(
            "SELECT ct.certificate_id, t.id AS tag_id, t.name AS tag_name
             FROM certificate_tags ct
             JOIN tags t ON t.id = ct.tag_id
             WHERE ct.certificate_id = ANY($1)
             ORDER BY t.name",
        )
        .bind(&ids[..])
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        let mut by_certificate: HashMap<i64, Vec<Tag>> = HashMap::new();
        for row in tag_rows {
            let tag = Tag::new(TagId::new(row.tag_id)?, TagName::new(row.tag_name)?);
            by_certificate.entry(row.certificate_id).or_default().push(tag);
        }

        rows.into_iter()
            .map(|row| {
                let tags = by_certificate.remove(&row.id).unwrap_or_default();
                row.into_certificate(tags)
            })
            .collect()
    }

    async fn require(&self, id: CertificateId) -> DomainResult<Certificate> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("certificate not found"))
    }

    /// Links tags by name. A stored row is share-locked so a concurrent
    /// orphan purge waits for this transaction and then sees the link; a row
    /// that is missing (or was purged since it was resolved) is upserted.
    async fn link_tags(
        tx: &mut Transaction<'_, Postgres>,
        certificate_id: i64,
        tags: Vec<ResolvedTag>,
    ) -> DomainResult<()> {
        for tag in tags {
            let name = tag.name().as_str().to_owned();
            let locked = sqlx::query_scalar::<_, i64>("SELECT id FROM tags WHERE name = $1 FOR SHARE")
                .bind(&name)
                .fetch_optional(&mut **tx)
                .await
                .map_err(map_sqlx)?;
            let tag_id = match locked {
                Some(id) => id,
                None => sqlx::query_scalar::<_, i64>(
                    "INSERT INTO tags (name) VALUES ($1)
                     ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
                     RETURNING id",
                )
                .bind(&name)
                .fetch_one(&mut **tx)
                .await
                .map_err(map_sqlx)?,
            };

            sqlx::query(
                "INSERT INTO certificate_tags (certificate_id, tag_id) VALUES ($1, $2)
                 ON CONFLICT DO NOTHING",
            )
            .bind(certificate_id)
            .bind(tag_id)
            .execute(&mut **tx)
            .await
            .map_err(map_sqlx)?;
        }
        Ok(())
    }

    /// Deletes the candidates no certificate links to. The rows are locked
    /// first, so the reference check runs after any transaction that is
    /// linking one of them has finished. Candidates already gone are skipped.
    async fn purge_orphans(
        tx: &mut Transaction<'_, Postgres>,
        candidates: &[TagId],
    ) -> DomainResult<Vec<Tag>> {
        if candidates.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = candidates.iter().map(|id| i64::from(*id)).collect();

        sqlx::query("SELECT id FROM tags WHERE id = ANY($1) ORDER BY id FOR UPDATE")
            .bind(&ids[..])
            .execute(&mut **tx)
            .await
            .map_err(map_sqlx)?;

        let rows = sqlx::query_as::<_, PurgedTagRow>(
            "DELETE FROM tags t
             WHERE t.id = ANY($1)
               AND NOT EXISTS (SELECT 1 FROM certificate_tags ct WHERE ct.tag_id = t.id)
             RETURNING t.id, t.name",
        )
        .bind(&ids[..])
        .fetch_all(&mut **tx)
        .await
        .map_err(map_sqlx)?;

        let purged = rows
            .into_iter()
            .map(|row| Ok(Tag::new(TagId::new(row.id)?, TagName::new(row.name)?)))
            .collect::<DomainResult<Vec<_>>>()?;
        for tag in &purged {
            tracing::info!(tag_id = tag.id.0, tag = %tag.name, "removed orphaned tag");
        }
        Ok(purged)
    }
}

#[async_trait]
impl CertificateWriteRepository for PostgresCertificateRepository {
    async fn insert(&self, certificate: NewCertificate) -> DomainResult<Certificate> {
        let NewCertificate {
            name,
            description,
            price,
            duration,
            created_at,
            updated_at,
            tags,
        } = certificate;

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO certificates (name, description, price, duration, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id",
        )
        .bind(name.into_inner())
        .bind(description.into_inner())
        .bind(price.into_inner())
        .bind(duration.days())
        .bind(created_at)
        .bind(updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        Self::link_tags(&mut tx, id, tags).await?;
        tx.commit().await.map_err(map_sqlx)?;

        self.require(CertificateId(id)).await
    }

    async fn update(
        &self,
        update: CertificateUpdate,
        orphan_candidates: &[TagId],
    ) -> DomainResult<(Certificate, Vec<Tag>)> {
        let CertificateUpdate {
            id,
            name,
            description,
            price,
            duration,
            tags,
            updated_at,
        } = update;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE certificates SET updated_at = ");
        builder.push_bind(updated_at);
        if let Some(name) = name {
            builder.push(", name = ");
            builder.push_bind(name.into_inner());
        }
        if let Some(description) = description {
            builder.push(", description = ");
            builder.push_bind(description.into_inner());
        }
        if let Some(price) = price {
            builder.push(", price = ");
            builder.push_bind(price.into_inner());
        }
        if let Some(duration) = duration {
            builder.push(", duration = ");
            builder.push_bind(duration.days());
        }
        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(id));
        builder.push(" RETURNING id");

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        builder
            .build_query_scalar::<i64>()
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::not_found("certificate not found"))?;

        if let Some(tags) = tags {
            sqlx::query("DELETE FROM certificate_tags WHERE certificate_id = $1")
                .bind(i64::from(id))
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx)?;
            Self::link_tags(&mut tx, i64::from(id), tags).await?;
        }
        let purged = Self::purge_orphans(&mut tx, orphan_candidates).await?;
        tx.commit().await.map_err(map_sqlx)?;

        Ok((self.require(id).await?, purged))
    }

    async fn delete(&self, id: CertificateId, orphan_candidates: &[TagId]) -> DomainResult<Vec<Tag>> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        let result = sqlx::query("DELETE FROM certificates WHERE id = $1")
            .bind(i64::from(id))
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("certificate not found"));
        }
        let purged = Self::purge_orphans(&mut tx, orphan_candidates).await?;
        tx.commit().await.map_err(map_sqlx)?;
        Ok(purged)
    }

    async fn purge_orphaned_tags(&self, candidates: &[TagId]) -> DomainResult<Vec<Tag>> {
        if candidates.is_empty() {
            return Ok(Vec::new());
        }
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        let purged = Self::purge_orphans(&mut tx, candidates).await?;
        tx.commit().await.map_err(map_sqlx)?;
        Ok(purged)
    }
}

#[async_trait]
impl CertificateReadRepository for PostgresCertificateRepository {
    async fn find_by_id(&self, id: CertificateId) -> DomainResult<Option<Certificate>> {
        let mut builder = Self::select();
        builder.push(" WHERE c.id = ");
        builder.push_bind(i64::from(id));
        Ok(self.fetch(builder).await?.into_iter().next())
    }

    async fn find_by_ids(&self, ids: &[CertificateId]) -> DomainResult<Vec<Certificate>> {
        let ids: Vec<i64> = ids.iter().map(|id| i64::from(*id)).collect();
        let mut builder = Self::select();
        builder.push(" WHERE c.id = ANY(");
        builder.push_bind(ids);
        builder.push(") ORDER BY c.id");
        self.fetch(builder).await
    }

    async fn find_by_name_and_description(
        &self,
        name: &CertificateName,
        description: &Description,
    ) -> DomainResult<Option<Certificate>> {
        let mut builder = Self::select();
        builder.push(" WHERE c.name = ");
        builder.push_bind(name.as_str().to_owned());
        builder.push(" AND c.description = ");
        builder.push_bind(description.as_str().to_owned());
        Ok(self.fetch(builder).await?.into_iter().next())
    }

    async fn list(&self, sort: &SortClause) -> DomainResult<Vec<Certificate>> {
        let mut builder = Self::select();
        Self::push_order_by(&mut builder, sort);
        self.fetch(builder).await
    }

    async fn find_by_name(
        &self,
        fragment: &str,
        sort: &SortClause,
    ) -> DomainResult<Vec<Certificate>> {
        let mut builder = Self::select();
        builder.push(" WHERE strpos(c.name, ");
        builder.push_bind(fragment.to_owned());
        builder.push(") > 0");
        Self::push_order_by(&mut builder, sort);
        self.fetch(builder).await
    }

    async fn find_by_description(
        &self,
        fragment: &str,
        sort: &SortClause,
    ) -> DomainResult<Vec<Certificate>> {
        let mut builder = Self::select();
        builder.push(" WHERE strpos(c.description, ");
        builder.push_bind(fragment.to_owned());
        builder.push(") > 0");
        Self::push_order_by(&mut builder, sort);
        self.fetch(builder).await
    }

    async fn find_by_tag_names(
        &self,
        names: &[TagName],
        sort: &SortClause,
    ) -> DomainResult<Vec<Certificate>> {
        let names: BTreeSet<String> = names.iter().map(|name| name.as_str().to_owned()).collect();
        let required = names.len() as i64;

        let mut builder = Self::select();
        builder.push(
            " WHERE c.id IN (SELECT ct.certificate_id FROM certificate_tags ct \
             JOIN tags t ON t.id = ct.tag_id WHERE t.name = ANY(",
        );
        builder.push_bind(names.into_iter().collect::<Vec<_>>());
        builder.push(") GROUP BY ct.certificate_id HAVING COUNT(DISTINCT t.name) = ");
        builder.push_bind(required);
        builder.push(")");
        Self::push_order_by(&mut builder, sort);
        self.fetch(builder).await
    }

    async fn find_by_user_id(
        &self,
        user_id: UserId,
        sort: &SortClause,
    ) -> DomainResult<Vec<Certificate>> {
        let mut builder = Self::select();
        builder.push(
            " WHERE c.id IN (SELECT oc.certificate_id FROM order_certificates oc \
             JOIN orders o ON o.id = oc.order_id WHERE o.user_id = ",
        );
        builder.push_bind(i64::from(user_id));
        builder.push(")");
        Self::push_order_by(&mut builder, sort);
        self.fetch(builder).await
    }

    async fn find_by_tag_id(&self, tag_id: TagId) -> DomainResult<Vec<Certificate>> {
        let mut builder = Self::select();
        builder.push(" WHERE c.id IN (SELECT certificate_id FROM certificate_tags WHERE tag_id = ");
        builder.push_bind(i64::from(tag_id));
        builder.push(") ORDER BY c.id");
        self.fetch(builder).await
    }
}
