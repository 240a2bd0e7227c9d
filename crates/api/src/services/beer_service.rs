use std::sync::Arc;

use taproom_core::beer::{like_pattern, BeerDto, BeerListParams, BeerPatch, BeerQuery};
use taproom_core::paging::{Page, PageRequest};
use taproom_core::types::DbId;
use taproom_db::mapper::BeerMapper;
use taproom_db::store::BeerStore;

use super::check_version;
use crate::error::AppResult;
use crate::extract::validate_fields;

/// Listing, lookup and mutation of beers over a [`BeerStore`].
#[derive(Clone)]
pub struct BeerService {
    store: Arc<dyn BeerStore>,
}

impl BeerService {
    pub fn new(store: Arc<dyn BeerStore>) -> Self {
        Self { store }
    }

    /// Resolve one page of beers.
    ///
    /// Exactly one store query answers the request, picked by which of
    /// name and style are present. Paging is normalized by
    /// [`PageRequest::build`]. When the caller explicitly hides inventory,
    /// `quantityOnHand` is nulled on every returned item.
    pub async fn list_beers(&self, params: &BeerListParams) -> AppResult<Page<BeerDto>> {
        let page = PageRequest::build(params.page_number, params.page_size);

        let beers = match BeerQuery::route(params.beer_name.as_deref(), params.beer_style) {
            BeerQuery::All => self.store.find_all(&page).await?,
            BeerQuery::ByName(name) => {
                self.store
                    .find_all_by_name_like(&like_pattern(&name), &page)
                    .await?
            }
            BeerQuery::ByStyle(style) => self.store.find_all_by_style(style, &page).await?,
            BeerQuery::ByNameAndStyle(name, style) => {
                self.store
                    .find_all_by_name_like_and_style(&like_pattern(&name), style, &page)
                    .await?
            }
        };

        let hide_inventory = params.hides_inventory();
        Ok(beers.map(|mut beer| {
            if hide_inventory {
                beer.quantity_on_hand = None;
            }
            BeerMapper::beer_to_beer_dto(beer)
        }))
    }

    pub async fn get_by_id(&self, id: DbId) -> AppResult<Option<BeerDto>> {
        Ok(self
            .store
            .find_by_id(id)
            .await?
            .map(BeerMapper::beer_to_beer_dto))
    }

    /// Persist a new beer. Caller-supplied id, version and timestamps are
    /// discarded; the store assigns them.
    pub async fn save_new(&self, dto: BeerDto) -> AppResult<BeerDto> {
        let mut beer = BeerMapper::beer_dto_to_beer(dto);
        beer.id = None;
        beer.version = None;
        beer.created_date = None;
        beer.updated_date = None;

        let saved = self.store.save(beer).await?;
        Ok(BeerMapper::beer_to_beer_dto(saved))
    }

    /// Replace name, style, price and quantity of an existing beer. The
    /// stored upc is kept. `None` if the id does not exist.
    pub async fn update(&self, id: DbId, dto: BeerDto) -> AppResult<Option<BeerDto>> {
        let Some(mut existing) = self.store.find_by_id(id).await? else {
            return Ok(None);
        };
        check_version("Beer", id, dto.version, existing.version)?;

        existing.beer_name = dto.beer_name;
        existing.beer_style = dto.beer_style;
        existing.price = dto.price;
        existing.quantity_on_hand = dto.quantity_on_hand;

        let saved = self.store.save(existing).await?;
        Ok(Some(BeerMapper::beer_to_beer_dto(saved)))
    }

    /// Apply the set fields of `patch`. Blank strings count as absent,
    /// `null` clears `quantityOnHand` and is rejected on required fields.
    /// `None` if the id does not exist.
    pub async fn patch(&self, id: DbId, patch: BeerPatch) -> AppResult<Option<BeerDto>> {
        let patch = patch.normalized();
        validate_fields(&patch)?;

        let Some(mut existing) = self.store.find_by_id(id).await? else {
            return Ok(None);
        };
        check_version("Beer", id, patch.version, existing.version)?;

        patch.beer_name.apply(&mut existing.beer_name);
        patch.beer_style.apply(&mut existing.beer_style);
        patch.upc.apply(&mut existing.upc);
        patch.price.apply(&mut existing.price);
        patch
            .quantity_on_hand
            .apply_optional(&mut existing.quantity_on_hand);

        let saved = self.store.save(existing).await?;
        Ok(Some(BeerMapper::beer_to_beer_dto(saved)))
    }

    /// Returns `false` when no beer has this id.
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
