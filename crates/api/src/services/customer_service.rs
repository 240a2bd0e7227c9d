use std::sync::Arc;

use taproom_core::customer::{CustomerDto, CustomerPatch};
use taproom_core::paging::{Page, PageRequest};
use taproom_core::types::DbId;
use taproom_db::mapper::CustomerMapper;
use taproom_db::store::CustomerStore;

use super::check_version;
use crate::error::AppResult;
use crate::extract::validate_fields;

/// Customer CRUD over a [`CustomerStore`], with the same create, replace,
/// patch and delete rules as [`super::BeerService`].
#[derive(Clone)]
pub struct CustomerService {
    store: Arc<dyn CustomerStore>,
}

impl CustomerService {
    pub fn new(store: Arc<dyn CustomerStore>) -> Self {
        Self { store }
    }

    pub async fn list_customers(&self, page: &PageRequest) -> AppResult<Page<CustomerDto>> {
        let customers = self.store.find_all(page).await?;
        Ok(customers.map(CustomerMapper::customer_to_customer_dto))
    }

    pub async fn get_by_id(&self, id: DbId) -> AppResult<Option<CustomerDto>> {
        Ok(self
            .store
            .find_by_id(id)
            .await?
            .map(CustomerMapper::customer_to_customer_dto))
    }

    pub async fn save_new(&self, dto: CustomerDto) -> AppResult<CustomerDto> {
        let mut customer = CustomerMapper::customer_dto_to_customer(dto);
        customer.id = None;
        customer.version = None;
        customer.created_date = None;
        customer.updated_date = None;

        let saved = self.store.save(customer).await?;
        Ok(CustomerMapper::customer_to_customer_dto(saved))
    }

    /// Replace name and email.
    pub async fn update(&self, id: DbId, dto: CustomerDto) -> AppResult<Option<CustomerDto>> {
        let Some(mut existing) = self.store.find_by_id(id).await? else {
            return Ok(None);
        };
        check_version("Customer", id, dto.version, existing.version)?;

        existing.name = dto.name;
        existing.email = dto.email;

        let saved = self.store.save(existing).await?;
        Ok(Some(CustomerMapper::customer_to_customer_dto(saved)))
    }

    pub async fn patch(&self, id: DbId, patch: CustomerPatch) -> AppResult<Option<CustomerDto>> {
        let patch = patch.normalized();
        validate_fields(&patch)?;

        let Some(mut existing) = self.store.find_by_id(id).await? else {
            return Ok(None);
        };
        check_version("Customer", id, patch.version, existing.version)?;

        patch.name.apply(&mut existing.name);
        patch.email.apply_optional(&mut existing.email);

        let saved = self.store.save(existing).await?;
        Ok(Some(CustomerMapper::customer_to_customer_dto(saved)))
    }

    pub async fn delete_by_id(&self, id: DbId) -> AppResult<bool> {
        if !self.store.exists_by_id(id).await? {
            return Ok(false);
        }
        self.store.delete_by_id(id).await?;
        Ok(true)
    }

    pub async fn count(&self) -> AppResult<i64> {
        Ok(self.store.count().await?)
    }
}
