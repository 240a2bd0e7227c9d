//! In-memory stores.
//!
//! Each table is a `HashMap` behind an async `RwLock`. Writes perform the
//! same compare-and-set on `version` as the PostgreSQL backend, under the
//! write lock. Listings are ordered the way the repositories order them:
//! case-insensitive name, then name, then id.
//!
//! Locks are taken in the order beers, categories, links and customers,
//! orders; no method holds them in any other order.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use taproom_core::beer::BeerStyle;
use taproom_core::paging::{Page, PageRequest};
use taproom_core::types::{DbId, Timestamp};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    check_beer, check_category, check_customer, check_order, expected_version, BeerOrderStore,
    BeerStore, CategoryStore, CustomerStore,
};
use crate::error::StoreError;
use crate::models::beer::Beer;
use crate::models::beer_order::BeerOrder;
use crate::models::category::Category;
use crate::models::customer::Customer;

#[derive(Default)]
pub struct MemoryStore {
    beers: RwLock<HashMap<DbId, Beer>>,
    customers: RwLock<HashMap<DbId, Customer>>,
    orders: RwLock<HashMap<DbId, BeerOrder>>,
    categories: RwLock<HashMap<DbId, Category>>,
    /// `(category_id, beer_id)` pairs.
    links: RwLock<BTreeSet<(DbId, DbId)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn list_beers<F>(&self, page: &PageRequest, keep: F) -> Page<Beer>
    where
        F: Fn(&Beer) -> bool,
    {
        let beers = self.beers.read().await;
        let mut matching: Vec<Beer> = beers.values().filter(|b| keep(b)).cloned().collect();
        matching.sort_by(|a, b| by_name(&a.beer_name, &b.beer_name).then(a.id.cmp(&b.id)));
        Page::from_sorted(matching, page)
    }
}

/// `lower(name) COLLATE "C", name COLLATE "C"`.
fn by_name(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Later of "now" and `created`, so `updated >= created` holds even if the
/// clock steps backwards.
fn touch(created: Option<Timestamp>) -> Timestamp {
    let now = Utc::now();
    match created {
        Some(created) if created > now => created,
        _ => now,
    }
}

#[async_trait]
impl BeerStore for MemoryStore {
    async fn find_by_id(&self, id: DbId) -> Result<Option<Beer>, StoreError> {
        Ok(self.beers.read().await.get(&id).cloned())
    }

    async fn find_all(&self, page: &PageRequest) -> Result<Page<Beer>, StoreError> {
        Ok(self.list_beers(page, |_| true).await)
    }

    async fn find_all_by_name_like(
        &self,
        pattern: &str,
        page: &PageRequest,
    ) -> Result<Page<Beer>, StoreError> {
        let pattern = LikePattern::compile(pattern);
        Ok(self
            .list_beers(page, |b| pattern.matches(&b.beer_name))
            .await)
    }

    async fn find_all_by_style(
        &self,
        style: BeerStyle,
        page: &PageRequest,
    ) -> Result<Page<Beer>, StoreError> {
        Ok(self.list_beers(page, |b| b.beer_style == style).await)
    }

    async fn find_all_by_name_like_and_style(
        &self,
        pattern: &str,
        style: BeerStyle,
        page: &PageRequest,
    ) -> Result<Page<Beer>, StoreError> {
        let pattern = LikePattern::compile(pattern);
        Ok(self
            .list_beers(page, |b| b.beer_style == style && pattern.matches(&b.beer_name))
            .await)
    }

    async fn save(&self, mut beer: Beer) -> Result<Beer, StoreError> {
        check_beer(&beer)?;
        let mut beers = self.beers.write().await;

        let Some(id) = beer.id else {
            let now = Utc::now();
            let id = Uuid::new_v4();
            beer.id = Some(id);
            beer.version = Some(0);
            beer.created_date = Some(now);
            beer.updated_date = Some(now);
            beers.insert(id, beer.clone());
            return Ok(beer);
        };

        let expected = expected_version("beer", beer.version)?;
        let stored = beers
            .get_mut(&id)
            .ok_or(StoreError::NotFound { entity: "Beer", id })?;
        if stored.version != Some(expected) {
            return Err(StoreError::VersionConflict {
                entity: "Beer",
                id,
                expected,
            });
        }

        stored.beer_name = beer.beer_name;
        stored.beer_style = beer.beer_style;
        stored.upc = beer.upc;
        stored.quantity_on_hand = beer.quantity_on_hand;
        stored.price = beer.price;
        stored.version = Some(expected + 1);
        stored.updated_date = Some(touch(stored.created_date));
        Ok(stored.clone())
    }

    async fn delete_by_id(&self, id: DbId) -> Result<(), StoreError> {
        let mut beers = self.beers.write().await;
        if beers.remove(&id).is_some() {
            self.links.write().await.retain(|&(_, beer)| beer != id);
        }
        Ok(())
    }

    async fn exists_by_id(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(self.beers.read().await.contains_key(&id))
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(self.beers.read().await.len() as i64)
    }
}

#[async_trait]
impl CustomerStore for MemoryStore {
    async fn find_by_id(&self, id: DbId) -> Result<Option<Customer>, StoreError> {
        Ok(self.customers.read().await.get(&id).cloned())
    }

    async fn find_all(&self, page: &PageRequest) -> Result<Page<Customer>, StoreError> {
        let customers = self.customers.read().await;
        let mut all: Vec<Customer> = customers.values().cloned().collect();
        all.sort_by(|a, b| by_name(&a.name, &b.name).then(a.id.cmp(&b.id)));
        Ok(Page::from_sorted(all, page))
    }

    async fn save(&self, mut customer: Customer) -> Result<Customer, StoreError> {
        check_customer(&customer)?;
        let mut customers = self.customers.write().await;

        let Some(id) = customer.id else {
            let now = Utc::now();
            let id = Uuid::new_v4();
            customer.id = Some(id);
            customer.version = Some(0);
            customer.created_date = Some(now);
            customer.updated_date = Some(now);
            customers.insert(id, customer.clone());
            return Ok(customer);
        };

        let expected = expected_version("customer", customer.version)?;
        let stored = customers.get_mut(&id).ok_or(StoreError::NotFound {
            entity: "Customer",
            id,
        })?;
        if stored.version != Some(expected) {
            return Err(StoreError::VersionConflict {
                entity: "Customer",
                id,
                expected,
            });
        }

        stored.name = customer.name;
        stored.email = customer.email;
        stored.version = Some(expected + 1);
        stored.updated_date = Some(touch(stored.created_date));
        Ok(stored.clone())
    }

    async fn delete_by_id(&self, id: DbId) -> Result<(), StoreError> {
        let mut customers = self.customers.write().await;
        let orders = self.orders.read().await;
        if orders.values().any(|o| o.customer_id == id) {
            return Err(StoreError::Referenced {
                entity: "Customer",
                id,
                referrer: "BeerOrder",
            });
        }
        customers.remove(&id);
        Ok(())
    }

    async fn exists_by_id(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(self.customers.read().await.contains_key(&id))
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(self.customers.read().await.len() as i64)
    }
}

#[async_trait]
impl BeerOrderStore for MemoryStore {
    async fn find_by_id(&self, id: DbId) -> Result<Option<BeerOrder>, StoreError> {
        Ok(self.orders.read().await.get(&id).cloned())
    }

    async fn find_all_by_customer(
        &self,
        customer_id: DbId,
        page: &PageRequest,
    ) -> Result<Page<BeerOrder>, StoreError> {
        let orders = self.orders.read().await;
        let mut matching: Vec<BeerOrder> = orders
            .values()
            .filter(|o| o.customer_id == customer_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.created_date.cmp(&b.created_date).then(a.id.cmp(&b.id)));
        Ok(Page::from_sorted(matching, page))
    }

    async fn save(&self, mut order: BeerOrder) -> Result<BeerOrder, StoreError> {
        check_order(&order)?;
        // Held until the write lands so the customer cannot be deleted
        // in between.
        let customers = self.customers.read().await;
        if !customers.contains_key(&order.customer_id) {
            return Err(StoreError::NotFound {
                entity: "Customer",
                id: order.customer_id,
            });
        }
        let mut orders = self.orders.write().await;

        let Some(id) = order.id else {
            let now = Utc::now();
            let id = Uuid::new_v4();
            order.id = Some(id);
            order.version = Some(0);
            order.created_date = Some(now);
            order.updated_date = Some(now);
            orders.insert(id, order.clone());
            return Ok(order);
        };

        let expected = expected_version("order", order.version)?;
        let stored = orders.get_mut(&id).ok_or(StoreError::NotFound {
            entity: "BeerOrder",
            id,
        })?;
        if stored.version != Some(expected) {
            return Err(StoreError::VersionConflict {
                entity: "BeerOrder",
                id,
                expected,
            });
        }

        stored.customer_id = order.customer_id;
        stored.customer_ref = order.customer_ref;
        stored.version = Some(expected + 1);
        stored.updated_date = Some(touch(stored.created_date));
        Ok(stored.clone())
    }

    async fn delete_by_id(&self, id: DbId) -> Result<(), StoreError> {
        self.orders.write().await.remove(&id);
        Ok(())
    }

    async fn exists_by_id(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(self.orders.read().await.contains_key(&id))
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(self.orders.read().await.len() as i64)
    }
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn find_by_id(&self, id: DbId) -> Result<Option<Category>, StoreError> {
        Ok(self.categories.read().await.get(&id).cloned())
    }

    async fn find_all(&self, page: &PageRequest) -> Result<Page<Category>, StoreError> {
        let categories = self.categories.read().await;
        let mut all: Vec<Category> = categories.values().cloned().collect();
        all.sort_by(|a, b| by_name(&a.description, &b.description).then(a.id.cmp(&b.id)));
        Ok(Page::from_sorted(all, page))
    }

    async fn save(&self, mut category: Category) -> Result<Category, StoreError> {
        check_category(&category)?;
        let mut categories = self.categories.write().await;

        let Some(id) = category.id else {
            let now = Utc::now();
            let id = Uuid::new_v4();
            category.id = Some(id);
            category.version = Some(0);
            category.created_date = Some(now);
            category.updated_date = Some(now);
            categories.insert(id, category.clone());
            return Ok(category);
        };

        let expected = expected_version("category", category.version)?;
        let stored = categories.get_mut(&id).ok_or(StoreError::NotFound {
            entity: "Category",
            id,
        })?;
        if stored.version != Some(expected) {
            return Err(StoreError::VersionConflict {
                entity: "Category",
                id,
                expected,
            });
        }

        stored.description = category.description;
        stored.version = Some(expected + 1);
        stored.updated_date = Some(touch(stored.created_date));
        Ok(stored.clone())
    }

    async fn delete_by_id(&self, id: DbId) -> Result<(), StoreError> {
        let mut categories = self.categories.write().await;
        if categories.remove(&id).is_some() {
            self.links.write().await.retain(|&(category, _)| category != id);
        }
        Ok(())
    }

    async fn exists_by_id(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(self.categories.read().await.contains_key(&id))
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(self.categories.read().await.len() as i64)
    }

    async fn add_beer(&self, category_id: DbId, beer_id: DbId) -> Result<(), StoreError> {
        let beers = self.beers.read().await;
        let categories = self.categories.read().await;
        if !categories.contains_key(&category_id) {
            return Err(StoreError::NotFound {
                entity: "Category",
                id: category_id,
            });
        }
        if !beers.contains_key(&beer_id) {
            return Err(StoreError::NotFound {
                entity: "Beer",
                id: beer_id,
            });
        }
        self.links.write().await.insert((category_id, beer_id));
        Ok(())
    }

    async fn remove_beer(&self, category_id: DbId, beer_id: DbId) -> Result<bool, StoreError> {
        Ok(self.links.write().await.remove(&(category_id, beer_id)))
    }

    async fn find_beers(
        &self,
        category_id: DbId,
        page: &PageRequest,
    ) -> Result<Page<Beer>, StoreError> {
        let beers = self.beers.read().await;
        let links = self.links.read().await;
        let mut matching: Vec<Beer> = links
            .iter()
            .filter(|&&(category, _)| category == category_id)
            .filter_map(|(_, beer)| beers.get(beer).cloned())
            .collect();
        matching.sort_by(|a, b| by_name(&a.beer_name, &b.beer_name).then(a.id.cmp(&b.id)));
        Ok(Page::from_sorted(matching, page))
    }

    async fn find_categories_of_beer(&self, beer_id: DbId) -> Result<Vec<Category>, StoreError> {
        let categories = self.categories.read().await;
        let links = self.links.read().await;
        let mut found: Vec<Category> = links
            .iter()
            .filter(|&&(_, beer)| beer == beer_id)
            .filter_map(|(category, _)| categories.get(category).cloned())
            .collect();
        found.sort_by(|a, b| by_name(&a.description, &b.description).then(a.id.cmp(&b.id)));
        Ok(found)
    }
}

// ---------------------------------------------------------------------------
// LIKE matching
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum Token {
    AnySeq,
    AnyChar,
    Lit(char),
}

/// A compiled case-insensitive SQL `LIKE` pattern (`ILIKE` semantics).
#[derive(Debug, Clone)]
struct LikePattern {
    tokens: Vec<Token>,
}

fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

impl LikePattern {
    fn compile(pattern: &str) -> Self {
        let mut tokens = Vec::new();
        let mut chars = pattern.chars();
        while let Some(c) = chars.next() {
            let token = match c {
                '\\' => Token::Lit(fold(chars.next().unwrap_or('\\'))),
                '%' => Token::AnySeq,
                '_' => Token::AnyChar,
                c => Token::Lit(fold(c)),
            };
            tokens.push(token);
        }
        Self { tokens }
    }

    fn matches(&self, text: &str) -> bool {
        let text: Vec<char> = text.chars().map(fold).collect();

        // reachable[j]: the tokens consumed so far can match text[..j].
        let mut reachable = vec![false; text.len() + 1];
        reachable[0] = true;

        for token in &self.tokens {
            let mut next = vec![false; text.len() + 1];
            match token {
                Token::AnySeq => {
                    let mut seen = false;
                    for j in 0..=text.len() {
                        seen |= reachable[j];
                        next[j] = seen;
                    }
                }
                Token::AnyChar => {
                    for j in 1..=text.len() {
                        next[j] = reachable[j - 1];
                    }
                }
                Token::Lit(c) => {
                    for j in 1..=text.len() {
                        next[j] = reachable[j - 1] && text[j - 1] == *c;
                    }
                }
            }
            reachable = next;
        }

        reachable[text.len()]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use rust_decimal::Decimal;
    use taproom_core::beer::like_pattern;

    use super::*;

    fn beer(name: &str, style: BeerStyle) -> Beer {
        Beer::new(name, style, "12356", Decimal::new(1299, 2), Some(100))
    }

    async fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        for (name, style) in [
            ("Galaxy Cat", BeerStyle::PaleAle),
            ("Galaxy Dog", BeerStyle::PaleAle),
            ("Sunshine City", BeerStyle::Ipa),
            ("Hazy IPA", BeerStyle::Ipa),
            ("Crank", BeerStyle::PaleAle),
        ] {
            BeerStore::save(&store, beer(name, style)).await.unwrap();
        }
        store
    }

    // -- LIKE ------------------------------------------------------------------

    #[test]
    fn like_matches_substring_case_insensitively() {
        let p = LikePattern::compile("%ipa%");
        assert!(p.matches("Hazy IPA"));
        assert!(p.matches("ipa"));
        assert!(!p.matches("Pale Ale"));
    }

    #[test]
    fn like_handles_wildcards_and_escapes() {
        assert!(LikePattern::compile("G_laxy%").matches("Galaxy Cat"));
        assert!(!LikePattern::compile("G_laxy").matches("Galaxy Cat"));
        assert!(LikePattern::compile(&like_pattern("100%")).matches("Brew 100% Malt"));
        assert!(!LikePattern::compile(&like_pattern("100%")).matches("Brew 1000 Malt"));
        assert!(LikePattern::compile(&like_pattern("a_b")).matches("xa_by"));
        assert!(!LikePattern::compile(&like_pattern("a_b")).matches("xacby"));
    }

    #[test]
    fn empty_like_pattern_only_matches_empty_text() {
        assert!(LikePattern::compile("").matches(""));
        assert!(!LikePattern::compile("").matches("x"));
        assert!(LikePattern::compile("%").matches("anything"));
    }

    // -- BeerStore ---------------------------------------------------------------

    #[tokio::test]
    async fn save_new_assigns_id_version_and_timestamps() {
        let store = MemoryStore::new();
        let saved = BeerStore::save(&store, beer("Galaxy Cat", BeerStyle::PaleAle))
            .await
            .unwrap();

        assert!(saved.id.is_some());
        assert_eq!(saved.version, Some(0));
        assert_eq!(saved.created_date, saved.updated_date);
        assert_eq!(BeerStore::count(&store).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn update_increments_version_and_keeps_created_date() {
        let store = MemoryStore::new();
        let saved = BeerStore::save(&store, beer("Crank", BeerStyle::PaleAle))
            .await
            .unwrap();

        let mut changed = saved.clone();
        changed.beer_name = "Crank Up".into();
        let updated = BeerStore::save(&store, changed).await.unwrap();

        assert_eq!(updated.id, saved.id);
        assert_eq!(updated.version, Some(1));
        assert_eq!(updated.created_date, saved.created_date);
        assert!(updated.updated_date >= updated.created_date);
    }

    #[tokio::test]
    async fn stale_version_is_a_conflict() {
        let store = MemoryStore::new();
        let saved = BeerStore::save(&store, beer("Crank", BeerStyle::PaleAle))
            .await
            .unwrap();
        BeerStore::save(&store, saved.clone()).await.unwrap();

        let result = BeerStore::save(&store, saved).await;
        assert_matches!(result, Err(StoreError::VersionConflict { expected: 0, .. }));
    }

    #[tokio::test]
    async fn update_of_missing_record_is_not_found() {
        let store = MemoryStore::new();
        let mut ghost = beer("Ghost", BeerStyle::Stout);
        ghost.id = Some(Uuid::new_v4());
        ghost.version = Some(0);

        assert_matches!(
            BeerStore::save(&store, ghost).await,
            Err(StoreError::NotFound { .. })
        );
    }

    #[tokio::test]
    async fn name_over_limit_is_rejected_at_the_boundary() {
        let store = MemoryStore::new();
        let long = "Budweiser123456789".repeat(4);
        assert_matches!(
            BeerStore::save(&store, beer(&long, BeerStyle::Ale)).await,
            Err(StoreError::Validation(_))
        );
        assert_eq!(BeerStore::count(&store).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn find_all_is_sorted_and_paged() {
        let store = seeded().await;
        let page = BeerStore::find_all(&store, &PageRequest::build(Some(1), Some(2)))
            .await
            .unwrap();

        assert_eq!(page.total_elements, 5);
        assert_eq!(page.total_pages, 3);
        let names: Vec<_> = page.content.iter().map(|b| b.beer_name.as_str()).collect();
        assert_eq!(names, ["Crank", "Galaxy Cat"]);
    }

    #[tokio::test]
    async fn names_sort_case_insensitively() {
        let store = MemoryStore::new();
        for name in ["Zebra", "apple", "Apple", "banana"] {
            BeerStore::save(&store, beer(name, BeerStyle::Ale)).await.unwrap();
        }

        let page = BeerStore::find_all(&store, &PageRequest::default())
            .await
            .unwrap();
        let names: Vec<_> = page.content.iter().map(|b| b.beer_name.as_str()).collect();
        assert_eq!(names, ["Apple", "apple", "banana", "Zebra"]);
    }

    #[tokio::test]
    async fn filtered_queries() {
        let store = seeded().await;
        let page = PageRequest::default();

        let by_name = store
            .find_all_by_name_like(&like_pattern("galaxy"), &page)
            .await
            .unwrap();
        assert_eq!(by_name.total_elements, 2);

        let by_style = store.find_all_by_style(BeerStyle::Ipa, &page).await.unwrap();
        assert_eq!(by_style.total_elements, 2);

        let both = store
            .find_all_by_name_like_and_style(&like_pattern("ipa"), BeerStyle::Ipa, &page)
            .await
            .unwrap();
        assert_eq!(both.content.len(), 1);
        assert_eq!(both.content[0].beer_name, "Hazy IPA");
    }

    #[tokio::test]
    async fn delete_removes_record() {
        let store = MemoryStore::new();
        let saved = BeerStore::save(&store, beer("Crank", BeerStyle::PaleAle))
            .await
            .unwrap();
        let id = saved.id.unwrap();

        BeerStore::delete_by_id(&store, id).await.unwrap();
        assert!(!BeerStore::exists_by_id(&store, id).await.unwrap());
        assert!(BeerStore::find_by_id(&store, id).await.unwrap().is_none());
    }

    // -- CustomerStore -----------------------------------------------------------

    #[tokio::test]
    async fn customer_save_and_update() {
        let store = MemoryStore::new();
        let saved = CustomerStore::save(&store, Customer::new("Customer 1", None))
            .await
            .unwrap();
        assert_eq!(saved.version, Some(0));

        let mut changed = saved.clone();
        changed.email = Some("one@example.com".into());
        let updated = CustomerStore::save(&store, changed).await.unwrap();
        assert_eq!(updated.version, Some(1));
        assert_eq!(updated.email.as_deref(), Some("one@example.com"));
        assert_eq!(CustomerStore::count(&store).await.unwrap(), 1);
    }

    // -- BeerOrderStore ----------------------------------------------------------

    async fn customer(store: &MemoryStore, name: &str) -> DbId {
        CustomerStore::save(store, Customer::new(name, None))
            .await
            .unwrap()
            .id
            .unwrap()
    }

    #[tokio::test]
    async fn order_is_saved_for_its_customer() {
        let store = MemoryStore::new();
        let customer_id = customer(&store, "Customer 1").await;

        let order = BeerOrderStore::save(&store, BeerOrder::new(customer_id, Some("PO-7".into())))
            .await
            .unwrap();
        assert!(order.id.is_some());
        assert_eq!(order.version, Some(0));

        let listed = store
            .find_all_by_customer(customer_id, &PageRequest::default())
            .await
            .unwrap();
        assert_eq!(listed.total_elements, 1);
        assert_eq!(listed.content[0].customer_ref.as_deref(), Some("PO-7"));
    }

    #[tokio::test]
    async fn order_for_unknown_customer_is_not_found() {
        let store = MemoryStore::new();
        let result = BeerOrderStore::save(&store, BeerOrder::new(Uuid::new_v4(), None)).await;

        assert_matches!(result, Err(StoreError::NotFound { entity: "Customer", .. }));
        assert_eq!(BeerOrderStore::count(&store).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn stale_order_version_is_a_conflict() {
        let store = MemoryStore::new();
        let customer_id = customer(&store, "Customer 1").await;
        let order = BeerOrderStore::save(&store, BeerOrder::new(customer_id, None))
            .await
            .unwrap();
        BeerOrderStore::save(&store, order.clone()).await.unwrap();

        assert_matches!(
            BeerOrderStore::save(&store, order).await,
            Err(StoreError::VersionConflict { entity: "BeerOrder", .. })
        );
    }

    #[tokio::test]
    async fn customer_with_orders_cannot_be_deleted() {
        let store = MemoryStore::new();
        let customer_id = customer(&store, "Customer 1").await;
        let order = BeerOrderStore::save(&store, BeerOrder::new(customer_id, None))
            .await
            .unwrap();

        assert_matches!(
            CustomerStore::delete_by_id(&store, customer_id).await,
            Err(StoreError::Referenced { entity: "Customer", referrer: "BeerOrder", .. })
        );
        assert!(CustomerStore::exists_by_id(&store, customer_id).await.unwrap());

        BeerOrderStore::delete_by_id(&store, order.id.unwrap()).await.unwrap();
        CustomerStore::delete_by_id(&store, customer_id).await.unwrap();
        assert!(!CustomerStore::exists_by_id(&store, customer_id).await.unwrap());
    }

    // -- CategoryStore -----------------------------------------------------------

    #[tokio::test]
    async fn beer_is_added_to_a_category() {
        let store = seeded().await;
        let category = CategoryStore::save(&store, Category::new("Pale"))
            .await
            .unwrap();
        let category_id = category.id.unwrap();

        let pale = store
            .find_all_by_style(BeerStyle::PaleAle, &PageRequest::default())
            .await
            .unwrap();
        for beer in &pale.content {
            store.add_beer(category_id, beer.id.unwrap()).await.unwrap();
        }
        // Linking twice is a no-op.
        store
            .add_beer(category_id, pale.content[0].id.unwrap())
            .await
            .unwrap();

        let beers = store
            .find_beers(category_id, &PageRequest::default())
            .await
            .unwrap();
        let names: Vec<_> = beers.content.iter().map(|b| b.beer_name.as_str()).collect();
        assert_eq!(names, ["Crank", "Galaxy Cat", "Galaxy Dog"]);

        let of_beer = store
            .find_categories_of_beer(pale.content[0].id.unwrap())
            .await
            .unwrap();
        assert_eq!(of_beer.len(), 1);
        assert_eq!(of_beer[0].description, "Pale");
    }

    #[tokio::test]
    async fn add_beer_requires_both_records() {
        let store = seeded().await;
        let category_id = CategoryStore::save(&store, Category::new("Pale"))
            .await
            .unwrap()
            .id
            .unwrap();

        assert_matches!(
            store.add_beer(category_id, Uuid::new_v4()).await,
            Err(StoreError::NotFound { entity: "Beer", .. })
        );
        assert_matches!(
            store.add_beer(Uuid::new_v4(), Uuid::new_v4()).await,
            Err(StoreError::NotFound { entity: "Category", .. })
        );
    }

    #[tokio::test]
    async fn deleting_either_side_drops_the_link() {
        let store = MemoryStore::new();
        let kept = BeerStore::save(&store, beer("Kept", BeerStyle::Ale)).await.unwrap();
        let gone = BeerStore::save(&store, beer("Gone", BeerStyle::Ale)).await.unwrap();
        let category_id = CategoryStore::save(&store, Category::new("Ales"))
            .await
            .unwrap()
            .id
            .unwrap();
        store.add_beer(category_id, kept.id.unwrap()).await.unwrap();
        store.add_beer(category_id, gone.id.unwrap()).await.unwrap();

        BeerStore::delete_by_id(&store, gone.id.unwrap()).await.unwrap();
        let beers = store
            .find_beers(category_id, &PageRequest::default())
            .await
            .unwrap();
        assert_eq!(beers.total_elements, 1);

        assert!(store.remove_beer(category_id, kept.id.unwrap()).await.unwrap());
        assert!(!store.remove_beer(category_id, kept.id.unwrap()).await.unwrap());

        store.add_beer(category_id, kept.id.unwrap()).await.unwrap();
        CategoryStore::delete_by_id(&store, category_id).await.unwrap();
        assert!(store
            .find_categories_of_beer(kept.id.unwrap())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn categories_sort_by_description() {
        let store = MemoryStore::new();
        for description in ["stout", "Ale", "lager"] {
            CategoryStore::save(&store, Category::new(description))
                .await
                .unwrap();
        }

        let page = CategoryStore::find_all(&store, &PageRequest::default())
            .await
            .unwrap();
        let descriptions: Vec<_> = page.content.iter().map(|c| c.description.as_str()).collect();
        assert_eq!(descriptions, ["Ale", "lager", "stout"]);
    }
}
