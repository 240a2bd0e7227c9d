//! Repository for `categories` and the `beer_category` link table.

use sqlx::PgPool;
use taproom_core::paging::{Page, PageRequest};
use taproom_core::types::DbId;

use crate::models::category::Category;

/// Column list for `categories` queries.
const COLUMNS: &str = "id, version, description, created_date, updated_date";

const ORDER: &str = "lower(description) COLLATE \"C\", description COLLATE \"C\", id";

pub struct CategoryRepo;

impl CategoryRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of categories ordered by description, then id.
    pub async fn list(pool: &PgPool, page: &PageRequest) -> Result<Page<Category>, sqlx::Error> {
        let total = Self::count(pool).await?;

        let query = format!(
            "SELECT {COLUMNS} FROM categories ORDER BY {ORDER} LIMIT $1 OFFSET $2"
        );
        let rows = sqlx::query_as::<_, Category>(&query)
            .bind(page.size)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        Ok(Page::new(rows, page, total))
    }

    /// Every category `beer_id` is linked to.
    pub async fn list_for_beer(pool: &PgPool, beer_id: DbId) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM categories \
             WHERE id IN (SELECT category_id FROM beer_category WHERE beer_id = $1) \
             ORDER BY {ORDER}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(beer_id)
            .fetch_all(pool)
            .await
    }

    pub async fn create(pool: &PgPool, category: &Category) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (description) VALUES ($1) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&category.description)
            .fetch_one(pool)
            .await
    }

    /// Compare-and-set update, see [`crate::repositories::BeerRepo::update`].
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        expected_version: i32,
        category: &Category,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET \
                 description = $3, \
                 version = version + 1, \
                 updated_date = GREATEST(now(), created_date) \
             WHERE id = $1 AND version = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(expected_version)
            .bind(&category.description)
            .fetch_optional(pool)
            .await
    }

    /// Deleting a category drops its links (`ON DELETE CASCADE`).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categories")
            .fetch_one(pool)
            .await
    }

    /// Link a beer to a category. Linking twice is a no-op.
    pub async fn link_beer(
        pool: &PgPool,
        category_id: DbId,
        beer_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO beer_category (beer_id, category_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(beer_id)
        .bind(category_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Returns `true` if a link was removed.
    pub async fn unlink_beer(
        pool: &PgPool,
        category_id: DbId,
        beer_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM beer_category WHERE beer_id = $1 AND category_id = $2")
                .bind(beer_id)
                .bind(category_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
