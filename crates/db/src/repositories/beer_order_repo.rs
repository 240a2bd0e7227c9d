//! Repository for the `beer_orders` table.

use sqlx::PgPool;
use taproom_core::paging::{Page, PageRequest};
use taproom_core::types::DbId;

use crate::models::beer_order::BeerOrder;

/// Column list for `beer_orders` queries.
const COLUMNS: &str = "id, version, customer_id, customer_ref, created_date, updated_date";

pub struct BeerOrderRepo;

impl BeerOrderRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<BeerOrder>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM beer_orders WHERE id = $1");
        sqlx::query_as::<_, BeerOrder>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of a customer's orders, oldest first.
    pub async fn list_for_customer(
        pool: &PgPool,
        customer_id: DbId,
        page: &PageRequest,
    ) -> Result<Page<BeerOrder>, sqlx::Error> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM beer_orders WHERE customer_id = $1",
        )
        .bind(customer_id)
        .fetch_one(pool)
        .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM beer_orders WHERE customer_id = $1 \
             ORDER BY created_date, id \
             LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, BeerOrder>(&query)
            .bind(customer_id)
            .bind(page.size)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        Ok(Page::new(rows, page, total))
    }

    pub async fn create(pool: &PgPool, order: &BeerOrder) -> Result<BeerOrder, sqlx::Error> {
        let query = format!(
            "INSERT INTO beer_orders (customer_id, customer_ref) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BeerOrder>(&query)
            .bind(order.customer_id)
            .bind(&order.customer_ref)
            .fetch_one(pool)
            .await
    }

    /// Compare-and-set update, see [`crate::repositories::BeerRepo::update`].
    /// Moving an order to another customer is allowed.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        expected_version: i32,
        order: &BeerOrder,
    ) -> Result<Option<BeerOrder>, sqlx::Error> {
        let query = format!(
            "UPDATE beer_orders SET \
                 customer_id = $3, \
                 customer_ref = $4, \
                 version = version + 1, \
                 updated_date = GREATEST(now(), created_date) \
             WHERE id = $1 AND version = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BeerOrder>(&query)
            .bind(id)
            .bind(expected_version)
            .bind(order.customer_id)
            .bind(&order.customer_ref)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM beer_orders WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM beer_orders WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    pub async fn exists_for_customer(pool: &PgPool, customer_id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM beer_orders WHERE customer_id = $1)",
        )
        .bind(customer_id)
        .fetch_one(pool)
        .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM beer_orders")
            .fetch_one(pool)
            .await
    }
}
