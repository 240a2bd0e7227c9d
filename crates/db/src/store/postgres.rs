//! PostgreSQL-backed stores.

use async_trait::async_trait;
use taproom_core::beer::BeerStyle;
use taproom_core::paging::{Page, PageRequest};
use taproom_core::types::DbId;

use super::{
    check_beer, check_category, check_customer, check_order, expected_version, BeerOrderStore,
    BeerStore, CategoryStore, CustomerStore,
};
use crate::error::StoreError;
use crate::models::beer::Beer;
use crate::models::beer_order::BeerOrder;
use crate::models::category::Category;
use crate::models::customer::Customer;
use crate::repositories::{BeerOrderRepo, BeerRepo, CategoryRepo, CustomerRepo};
use crate::DbPool;

/// Implements every store trait on top of a shared connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl BeerStore for PgStore {
    async fn find_by_id(&self, id: DbId) -> Result<Option<Beer>, StoreError> {
        Ok(BeerRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_all(&self, page: &PageRequest) -> Result<Page<Beer>, StoreError> {
        Ok(BeerRepo::list(&self.pool, None, None, page).await?)
    }

    async fn find_all_by_name_like(
        &self,
        pattern: &str,
        page: &PageRequest,
    ) -> Result<Page<Beer>, StoreError> {
        Ok(BeerRepo::list(&self.pool, Some(pattern), None, page).await?)
    }

    async fn find_all_by_style(
        &self,
        style: BeerStyle,
        page: &PageRequest,
    ) -> Result<Page<Beer>, StoreError> {
        Ok(BeerRepo::list(&self.pool, None, Some(style), page).await?)
    }

    async fn find_all_by_name_like_and_style(
        &self,
        pattern: &str,
        style: BeerStyle,
        page: &PageRequest,
    ) -> Result<Page<Beer>, StoreError> {
        Ok(BeerRepo::list(&self.pool, Some(pattern), Some(style), page).await?)
    }

    async fn save(&self, beer: Beer) -> Result<Beer, StoreError> {
        check_beer(&beer)?;

        let Some(id) = beer.id else {
            return Ok(BeerRepo::create(&self.pool, &beer).await?);
        };
        let expected = expected_version("beer", beer.version)?;

        match BeerRepo::update(&self.pool, id, expected, &beer).await? {
            Some(saved) => Ok(saved),
            None if BeerRepo::exists(&self.pool, id).await? => Err(StoreError::VersionConflict {
                entity: "Beer",
                id,
                expected,
            }),
            None => Err(StoreError::NotFound { entity: "Beer", id }),
        }
    }

    async fn delete_by_id(&self, id: DbId) -> Result<(), StoreError> {
        BeerRepo::delete(&self.pool, id).await?;
        Ok(())
    }

    async fn exists_by_id(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(BeerRepo::exists(&self.pool, id).await?)
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(BeerRepo::count(&self.pool).await?)
    }
}

#[async_trait]
impl CustomerStore for PgStore {
    async fn find_by_id(&self, id: DbId) -> Result<Option<Customer>, StoreError> {
        Ok(CustomerRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_all(&self, page: &PageRequest) -> Result<Page<Customer>, StoreError> {
        Ok(CustomerRepo::list(&self.pool, page).await?)
    }

    async fn save(&self, customer: Customer) -> Result<Customer, StoreError> {
        check_customer(&customer)?;

        let Some(id) = customer.id else {
            return Ok(CustomerRepo::create(&self.pool, &customer).await?);
        };
        let expected = expected_version("customer", customer.version)?;

        match CustomerRepo::update(&self.pool, id, expected, &customer).await? {
            Some(saved) => Ok(saved),
            None if CustomerRepo::exists(&self.pool, id).await? => {
                Err(StoreError::VersionConflict {
                    entity: "Customer",
                    id,
                    expected,
                })
            }
            None => Err(StoreError::NotFound {
                entity: "Customer",
                id,
            }),
        }
    }

    async fn delete_by_id(&self, id: DbId) -> Result<(), StoreError> {
        if BeerOrderRepo::exists_for_customer(&self.pool, id).await? {
            return Err(StoreError::Referenced {
                entity: "Customer",
                id,
                referrer: "BeerOrder",
            });
        }
        CustomerRepo::delete(&self.pool, id).await?;
        Ok(())
    }

    async fn exists_by_id(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(CustomerRepo::exists(&self.pool, id).await?)
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(CustomerRepo::count(&self.pool).await?)
    }
}

#[async_trait]
impl BeerOrderStore for PgStore {
    async fn find_by_id(&self, id: DbId) -> Result<Option<BeerOrder>, StoreError> {
        Ok(BeerOrderRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_all_by_customer(
        &self,
        customer_id: DbId,
        page: &PageRequest,
    ) -> Result<Page<BeerOrder>, StoreError> {
        Ok(BeerOrderRepo::list_for_customer(&self.pool, customer_id, page).await?)
    }

    async fn save(&self, order: BeerOrder) -> Result<BeerOrder, StoreError> {
        check_order(&order)?;
        if !CustomerRepo::exists(&self.pool, order.customer_id).await? {
            return Err(StoreError::NotFound {
                entity: "Customer",
                id: order.customer_id,
            });
        }

        let Some(id) = order.id else {
            return Ok(BeerOrderRepo::create(&self.pool, &order).await?);
        };
        let expected = expected_version("order", order.version)?;

        match BeerOrderRepo::update(&self.pool, id, expected, &order).await? {
            Some(saved) => Ok(saved),
            None if BeerOrderRepo::exists(&self.pool, id).await? => {
                Err(StoreError::VersionConflict {
                    entity: "BeerOrder",
                    id,
                    expected,
                })
            }
            None => Err(StoreError::NotFound {
                entity: "BeerOrder",
                id,
            }),
        }
    }

    async fn delete_by_id(&self, id: DbId) -> Result<(), StoreError> {
        BeerOrderRepo::delete(&self.pool, id).await?;
        Ok(())
    }

    async fn exists_by_id(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(BeerOrderRepo::exists(&self.pool, id).await?)
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(BeerOrderRepo::count(&self.pool).await?)
    }
}

#[async_trait]
impl CategoryStore for PgStore {
    async fn find_by_id(&self, id: DbId) -> Result<Option<Category>, StoreError> {
        Ok(CategoryRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_all(&self, page: &PageRequest) -> Result<Page<Category>, StoreError> {
        Ok(CategoryRepo::list(&self.pool, page).await?)
    }

    async fn save(&self, category: Category) -> Result<Category, StoreError> {
        check_category(&category)?;

        let Some(id) = category.id else {
            return Ok(CategoryRepo::create(&self.pool, &category).await?);
        };
        let expected = expected_version("category", category.version)?;

        match CategoryRepo::update(&self.pool, id, expected, &category).await? {
            Some(saved) => Ok(saved),
            None if CategoryRepo::exists(&self.pool, id).await? => {
                Err(StoreError::VersionConflict {
                    entity: "Category",
                    id,
                    expected,
                })
            }
            None => Err(StoreError::NotFound {
                entity: "Category",
                id,
            }),
        }
    }

    async fn delete_by_id(&self, id: DbId) -> Result<(), StoreError> {
        CategoryRepo::delete(&self.pool, id).await?;
        Ok(())
    }

    async fn exists_by_id(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(CategoryRepo::exists(&self.pool, id).await?)
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(CategoryRepo::count(&self.pool).await?)
    }

    async fn add_beer(&self, category_id: DbId, beer_id: DbId) -> Result<(), StoreError> {
        if !CategoryRepo::exists(&self.pool, category_id).await? {
            return Err(StoreError::NotFound {
                entity: "Category",
                id: category_id,
            });
        }
        if !BeerRepo::exists(&self.pool, beer_id).await? {
            return Err(StoreError::NotFound {
                entity: "Beer",
                id: beer_id,
            });
        }
        Ok(CategoryRepo::link_beer(&self.pool, category_id, beer_id).await?)
    }

    async fn remove_beer(&self, category_id: DbId, beer_id: DbId) -> Result<bool, StoreError> {
        Ok(CategoryRepo::unlink_beer(&self.pool, category_id, beer_id).await?)
    }

    async fn find_beers(
        &self,
        category_id: DbId,
        page: &PageRequest,
    ) -> Result<Page<Beer>, StoreError> {
        Ok(BeerRepo::list_in_category(&self.pool, category_id, page).await?)
    }

    async fn find_categories_of_beer(&self, beer_id: DbId) -> Result<Vec<Category>, StoreError> {
        Ok(CategoryRepo::list_for_beer(&self.pool, beer_id).await?)
    }
}
