//! Repository for the `customers` table.

use sqlx::PgPool;
use taproom_core::paging::{Page, PageRequest};
use taproom_core::types::DbId;

use crate::models::customer::Customer;

/// Column list for `customers` queries.
const COLUMNS: &str = "id, version, name, email, created_date, updated_date";

/// Provides CRUD operations for customers.
pub struct CustomerRepo;

impl CustomerRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM customers WHERE id = $1");
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List one page of customers ordered by name, then id.
    pub async fn list(pool: &PgPool, page: &PageRequest) -> Result<Page<Customer>, sqlx::Error> {
        let total = Self::count(pool).await?;

        let query = format!(
            "SELECT {COLUMNS} FROM customers \
             ORDER BY lower(name) COLLATE \"C\", name COLLATE \"C\", id \
             LIMIT $1 OFFSET $2"
        );
        let rows = sqlx::query_as::<_, Customer>(&query)
            .bind(page.size)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        Ok(Page::new(rows, page, total))
    }

    pub async fn create(pool: &PgPool, customer: &Customer) -> Result<Customer, sqlx::Error> {
        let query = format!(
            "INSERT INTO customers (name, email) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(&customer.name)
            .bind(&customer.email)
            .fetch_one(pool)
            .await
    }

    /// Compare-and-set update, see [`crate::repositories::BeerRepo::update`].
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        expected_version: i32,
        customer: &Customer,
    ) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!(
            "UPDATE customers SET \
                 name = $3, \
                 email = $4, \
                 version = version + 1, \
                 updated_date = GREATEST(now(), created_date) \
             WHERE id = $1 AND version = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .bind(expected_version)
            .bind(&customer.name)
            .bind(&customer.email)
            .fetch_optional(pool)
            .await
    }

    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM customers WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM customers")
            .fetch_one(pool)
            .await
    }
}
