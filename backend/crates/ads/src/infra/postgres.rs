//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::error::store::StoreResult;
use kernel::id::{AdId, UserId};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::domain::entities::{Ad, NewAd};
use crate::domain::repository::AdRepository;
use crate::domain::value_objects::ListQuery;

const AD_COLUMNS: &str = "id, user_id, author_login, title, text, image_url, price, created_at";

/// PostgreSQL-backed ad repository
#[derive(Clone)]
pub struct PgAdRepository {
    pool: PgPool,
}

impl PgAdRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl AdRepository for PgAdRepository {
    async fn create(&self, ad: &NewAd) -> StoreResult<AdId> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO ads (user_id, author_login, title, text, image_url, price)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(ad.user_id.value())
        .bind(&ad.author_login)
        .bind(&ad.title)
        .bind(&ad.text)
        .bind(ad.image_url.as_deref())
        .bind(ad.price)
        .fetch_one(&self.pool)
        .await?;

        Ok(AdId::new(id))
    }

    async fn find_by_id(&self, ad_id: AdId) -> StoreResult<Option<Ad>> {
        let row = sqlx::query_as::<_, AdRow>(&format!(
            "SELECT {AD_COLUMNS} FROM ads WHERE id = $1"
        ))
        .bind(ad_id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Ad::from))
    }

    async fn list(&self, query: &ListQuery) -> StoreResult<Vec<Ad>> {
        let mut builder = list_query_builder(query);

        let rows = builder
            .build_query_as::<AdRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Ad::from).collect())
    }
}

/// Build the listing statement
///
/// Sort column and direction come from whitelisted enums; every value is
/// a bind parameter.
fn list_query_builder(query: &ListQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {AD_COLUMNS} FROM ads"));

    let mut keyword = " WHERE ";
    if let Some(min) = query.min_price {
        builder.push(keyword).push("price >= ").push_bind(min);
        keyword = " AND ";
    }
    if let Some(max) = query.max_price {
        builder.push(keyword).push("price <= ").push_bind(max);
    }

    // id breaks ties so pages do not overlap
    let direction = query.order.as_sql();
    builder.push(format!(
        " ORDER BY {} {direction}, id {direction}",
        query.sort_by.as_sql()
    ));

    builder
        .push(" LIMIT ")
        .push_bind(query.limit)
        .push(" OFFSET ")
        .push_bind(query.offset());

    builder
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct AdRow {
    id: i64,
    user_id: i64,
    author_login: String,
    title: String,
    text: String,
    image_url: Option<String>,
    price: i64,
    created_at: DateTime<Utc>,
}

impl From<AdRow> for Ad {
    fn from(row: AdRow) -> Self {
        Ad {
            id: AdId::new(row.id),
            user_id: UserId::new(row.user_id),
            title: row.title,
            text: row.text,
            image_url: row.image_url,
            price: row.price,
            author_login: row.author_login,
            created_at: row.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{SortBy, SortOrder};

    #[test]
    fn test_list_sql_without_filters() {
        let builder = list_query_builder(&ListQuery::default());
        assert_eq!(
            builder.sql(),
            "SELECT id, user_id, author_login, title, text, image_url, price, created_at FROM ads \
             ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2"
        );
    }

    #[test]
    fn test_list_sql_with_price_range() {
        let query = ListQuery {
            sort_by: SortBy::Price,
            order: SortOrder::Asc,
            min_price: Some(100),
            max_price: Some(500),
            ..ListQuery::default()
        };
        let builder = list_query_builder(&query);
        assert!(builder.sql().ends_with(
            "FROM ads WHERE price >= $1 AND price <= $2 \
             ORDER BY price ASC, id ASC LIMIT $3 OFFSET $4"
        ));
    }

    #[test]
    fn test_list_sql_with_max_only() {
        let query = ListQuery {
            max_price: Some(500),
            ..ListQuery::default()
        };
        let builder = list_query_builder(&query);
        assert!(builder.sql().contains("FROM ads WHERE price <= $1 ORDER BY"));
    }
}
