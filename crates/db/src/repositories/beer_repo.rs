//! Repository for the `beers` table.

use sqlx::PgPool;
use taproom_core::beer::BeerStyle;
use taproom_core::paging::{Page, PageRequest};
use taproom_core::types::DbId;

use crate::models::beer::Beer;

/// Column list for `beers` queries.
const COLUMNS: &str = "\
    id, version, beer_name, beer_style, upc, quantity_on_hand, price, \
    created_date, updated_date";

/// Provides data access for beers.
pub struct BeerRepo;

impl BeerRepo {
    /// Find a beer by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Beer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM beers WHERE id = $1");
        sqlx::query_as::<_, Beer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List one page of beers, optionally filtered by an `ILIKE` name pattern
    /// and/or an exact style. Ordered case-insensitively by name, then by
    /// code point, then id, independent of the database locale.
    pub async fn list(
        pool: &PgPool,
        name_pattern: Option<&str>,
        style: Option<BeerStyle>,
        page: &PageRequest,
    ) -> Result<Page<Beer>, sqlx::Error> {
        // Build dynamic WHERE clauses.
        let mut conditions = Vec::new();
        let mut bind_idx = 1u32;

        if name_pattern.is_some() {
            conditions.push(format!("beer_name ILIKE ${bind_idx}"));
            bind_idx += 1;
        }
        if style.is_some() {
            conditions.push(format!("beer_style = ${bind_idx}"));
            bind_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_query = format!("SELECT COUNT(*) FROM beers {where_clause}");
        let mut count_q = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(pattern) = name_pattern {
            count_q = count_q.bind(pattern);
        }
        if let Some(style) = style {
            count_q = count_q.bind(style.as_str());
        }
        let total = count_q.fetch_one(pool).await?;

        let query = format!(
            "SELECT {COLUMNS} FROM beers {where_clause} \
             ORDER BY lower(beer_name) COLLATE \"C\", beer_name COLLATE \"C\", id \
             LIMIT ${bind_idx} OFFSET ${next_idx}",
            next_idx = bind_idx + 1,
        );
        let mut q = sqlx::query_as::<_, Beer>(&query);
        if let Some(pattern) = name_pattern {
            q = q.bind(pattern);
        }
        if let Some(style) = style {
            q = q.bind(style.as_str());
        }
        let rows = q.bind(page.size).bind(page.offset()).fetch_all(pool).await?;

        Ok(Page::new(rows, page, total))
    }

    /// One page of the beers linked to `category_id`, in listing order.
    pub async fn list_in_category(
        pool: &PgPool,
        category_id: DbId,
        page: &PageRequest,
    ) -> Result<Page<Beer>, sqlx::Error> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM beer_category WHERE category_id = $1",
        )
        .bind(category_id)
        .fetch_one(pool)
        .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM beers \
             WHERE id IN (SELECT beer_id FROM beer_category WHERE category_id = $1) \
             ORDER BY lower(beer_name) COLLATE \"C\", beer_name COLLATE \"C\", id \
             LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, Beer>(&query)
            .bind(category_id)
            .bind(page.size)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        Ok(Page::new(rows, page, total))
    }

    /// Insert a new beer. The database assigns id, version and timestamps.
    pub async fn create(pool: &PgPool, beer: &Beer) -> Result<Beer, sqlx::Error> {
        let query = format!(
            "INSERT INTO beers (beer_name, beer_style, upc, quantity_on_hand, price) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Beer>(&query)
            .bind(&beer.beer_name)
            .bind(beer.beer_style.as_str())
            .bind(&beer.upc)
            .bind(beer.quantity_on_hand)
            .bind(beer.price)
            .fetch_one(pool)
            .await
    }

    /// Replace the mutable columns of a beer if its stored version still
    /// equals `expected_version`.
    ///
    /// Returns `None` when the id is missing or the version moved on.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        expected_version: i32,
        beer: &Beer,
    ) -> Result<Option<Beer>, sqlx::Error> {
        let query = format!(
            "UPDATE beers SET \
                 beer_name = $3, \
                 beer_style = $4, \
                 upc = $5, \
                 quantity_on_hand = $6, \
                 price = $7, \
                 version = version + 1, \
                 updated_date = GREATEST(now(), created_date) \
             WHERE id = $1 AND version = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Beer>(&query)
            .bind(id)
            .bind(expected_version)
            .bind(&beer.beer_name)
            .bind(beer.beer_style.as_str())
            .bind(&beer.upc)
            .bind(beer.quantity_on_hand)
            .bind(beer.price)
            .fetch_optional(pool)
            .await
    }

    /// Delete a beer by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM beers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM beers WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM beers")
            .fetch_one(pool)
            .await
    }
}
