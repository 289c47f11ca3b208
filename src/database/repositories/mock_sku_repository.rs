use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::sku_repository::{SkuRepository, SkuRepositoryError};
use crate::database::override_store::{OverrideKind, OverrideStore};
use crate::database::seed::SeedData;
use crate::models::{
    sort_categories, BundleType, Category, ComponentOption, ListQuery, PaginatedResponse,
    RenameSkuCodeResponse, SaveSkuRequest, SkuDetail, SkuListItem,
};
use crate::utils::calculations::{
    amazon_fee, component_cost, recalculate_component_costs, DEFAULT_AMAZON_FEE_RATE,
};
use crate::utils::config::{Config, MockDataset};
use crate::utils::pagination::{
    clamp_page_size, filter_by_search, paginate, sort_items, DEFAULT_MAX_PAGE_SIZE,
};

/// In-memory backend: a read-only seed plus the records saved during this
/// session. Nothing outlives the repository instance.
pub struct MockSkuRepository {
    seed: SeedData,
    base_index: HashMap<String, usize>,
    overrides: RwLock<OverrideStore>,
    fee_rate: Decimal,
    latency: Duration,
    max_page_size: u32,
}

impl MockSkuRepository {
    pub fn new(dataset: MockDataset) -> Self {
        let seed = SeedData::load(dataset);
        let base_index = seed
            .list
            .iter()
            .enumerate()
            .map(|(position, item)| (item.id.clone(), position))
            .collect();

        tracing::debug!(
            "Mock backend seeded with {} records ({} dataset)",
            seed.list.len(),
            dataset
        );

        Self {
            seed,
            base_index,
            overrides: RwLock::new(OverrideStore::new()),
            fee_rate: DEFAULT_AMAZON_FEE_RATE,
            latency: Duration::ZERO,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.mock_dataset)
            .with_fee_rate(config.amazon_fee_rate)
            .with_latency(config.mock_latency)
            .with_max_page_size(config.max_page_size)
    }

    pub fn with_fee_rate(mut self, fee_rate: Decimal) -> Self {
        self.fee_rate = fee_rate;
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_max_page_size(mut self, max_page_size: u32) -> Self {
        self.max_page_size = max_page_size;
        self
    }

    pub async fn override_count(&self) -> usize {
        self.overrides.read().await.len()
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn base_item(&self, id: &str) -> Option<&SkuListItem> {
        self.base_index.get(id).map(|&position| &self.seed.list[position])
    }

    fn seed_detail(&self, id: &str) -> Option<SkuDetail> {
        let detail = match self.seed.details.get(id) {
            Some(detail) => detail.clone(),
            None => self
                .base_item(id)
                .map(|item| self.seed.fallback_detail(item, self.fee_rate))?,
        };
        Some(self.recompute(detail))
    }

    /// Derived totals always come from the lines and the configured fee rate,
    /// never from what was stored.
    fn recompute(&self, mut detail: SkuDetail) -> SkuDetail {
        detail.components = recalculate_component_costs(&detail.components);
        detail.component_cost = component_cost(&detail.components);
        detail.amazon_fee = amazon_fee(detail.selling_price, self.fee_rate);
        detail
    }

    /// Write a detail into the store, tagging it against the seed list.
    fn store_detail(&self, store: &mut OverrideStore, detail: SkuDetail) {
        let kind = if self.base_index.contains_key(&detail.id) {
            OverrideKind::Overridden
        } else {
            OverrideKind::Created
        };
        let previous_row = store
            .get(&detail.id)
            .map(|entry| entry.list_item.clone())
            .or_else(|| self.base_item(&detail.id).cloned());
        let list_item = SkuListItem::project(&detail, previous_row.as_ref());

        tracing::debug!("Storing {:?} record {}", kind, detail.id);
        store.upsert(kind, detail, list_item);
    }
}

fn new_sku_id() -> String {
    format!("sku-{}", Uuid::new_v4().simple())
}

#[async_trait]
impl SkuRepository for MockSkuRepository {
    async fn list_skus(
        &self,
        query: &ListQuery,
    ) -> Result<PaginatedResponse<SkuListItem>, SkuRepositoryError> {
        self.simulate_latency().await;

        let merged = self.overrides.read().await.merge_with_base(&self.seed.list);
        let mut filtered = filter_by_search(merged, query.search.as_deref());
        if let Some(field) = query.sort_by {
            sort_items(&mut filtered, field, query.sort_order.unwrap_or_default());
        }

        let page_size = clamp_page_size(query.page_size, self.max_page_size);
        Ok(paginate(&filtered, query.page, page_size))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<SkuDetail>, SkuRepositoryError> {
        self.simulate_latency().await;

        if let Some(entry) = self.overrides.read().await.get(id) {
            tracing::debug!("Serving {:?} record {} saved at {}", entry.kind, id, entry.saved_at);
            return Ok(Some(entry.detail.clone()));
        }
        Ok(self.seed_detail(id))
    }

    async fn save(&self, request: SaveSkuRequest) -> Result<SkuDetail, SkuRepositoryError> {
        self.simulate_latency().await;

        let id = request
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(new_sku_id);
        let detail = self.recompute(SkuDetail {
            id,
            sku_code: request.sku_code,
            bundle_type_id: request.bundle_type_id,
            bundle_type_name: request.bundle_type_name,
            components: request.components,
            main_image_url: request.main_image_url,
            title: request.title,
            description: request.description,
            component_cost: request.component_cost,
            shipping_fee: request.shipping_fee,
            selling_price: request.selling_price,
            amazon_fee: request.amazon_fee,
        });

        let mut store = self.overrides.write().await;
        self.store_detail(&mut store, detail.clone());
        Ok(detail)
    }

    async fn rename_code(
        &self,
        id: &str,
        new_code: &str,
    ) -> Result<RenameSkuCodeResponse, SkuRepositoryError> {
        self.simulate_latency().await;

        let mut store = self.overrides.write().await;
        let mut detail = match store.detail(id) {
            Some(detail) => detail.clone(),
            None => self.seed_detail(id).ok_or(SkuRepositoryError::NotFound)?,
        };
        detail.sku_code = new_code.to_string();
        self.store_detail(&mut store, detail);

        Ok(RenameSkuCodeResponse {
            sku_code: new_code.to_string(),
        })
    }

    async fn list_bundle_types(&self) -> Result<Vec<BundleType>, SkuRepositoryError> {
        self.simulate_latency().await;
        Ok(self.seed.catalog.bundle_types.clone())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, SkuRepositoryError> {
        self.simulate_latency().await;
        let mut categories = self.seed.catalog.categories.clone();
        sort_categories(&mut categories);
        Ok(categories)
    }

    async fn list_component_options(&self) -> Result<Vec<ComponentOption>, SkuRepositoryError> {
        self.simulate_latency().await;
        Ok(self.seed.catalog.component_options.clone())
    }
}
