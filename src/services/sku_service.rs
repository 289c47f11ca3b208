use rust_decimal::Decimal;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};
use validator::Validate;

use crate::{
    database::repositories::{
        ApiSkuRepository, MockSkuRepository, SkuRepository, SkuRepositoryError,
    },
    models::{
        sort_categories, BundleType, Catalog, Category, ComponentOption, ListQuery,
        PaginatedResponse, RenameSkuCodeResponse, SaveSkuRequest, SkuDetail, SkuListItem,
    },
    services::bundle_editor::BundleEditor,
    utils::{config::Config, pagination::clamp_page_size},
};

#[derive(Error, Debug)]
pub enum SkuServiceError {
    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Failed to save SKU: {reason}")]
    SaveFailed { reason: String },

    #[error("Failed to update SKU code: {reason}")]
    RenameFailed { reason: String },

    #[error("Repository error: {0}")]
    RepositoryError(#[from] SkuRepositoryError),
}

pub struct SkuService {
    sku_repository: Arc<dyn SkuRepository>,
    default_page_size: u32,
    max_page_size: u32,
    fee_rate: Decimal,
}

impl SkuService {
    pub fn new(sku_repository: Arc<dyn SkuRepository>, config: &Config) -> Self {
        Self {
            sku_repository,
            default_page_size: config.default_page_size,
            max_page_size: config.max_page_size,
            fee_rate: config.amazon_fee_rate,
        }
    }

    /// Wire the backend selected by `USE_MOCK_API`.
    pub fn from_config(config: &Config) -> Result<Self, SkuServiceError> {
        let repository: Arc<dyn SkuRepository> = if config.use_mock_api {
            info!("Using in-memory mock backend ({} dataset)", config.mock_dataset);
            Arc::new(MockSkuRepository::from_config(config))
        } else {
            info!("Using REST backend at {}", config.api_base_url);
            Arc::new(ApiSkuRepository::from_config(config)?)
        };
        Ok(Self::new(repository, config))
    }

    pub fn fee_rate(&self) -> Decimal {
        self.fee_rate
    }

    /// List one page. A zero page size means "use the default"; anything
    /// else is clamped to the configured maximum.
    pub async fn list_skus(
        &self,
        mut query: ListQuery,
    ) -> Result<PaginatedResponse<SkuListItem>, SkuServiceError> {
        query.page_size = if query.page_size == 0 {
            self.default_page_size
        } else {
            clamp_page_size(query.page_size, self.max_page_size)
        };
        query.search = query
            .search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        debug!(
            "Listing SKUs page {} size {} search {:?}",
            query.page, query.page_size, query.search
        );

        let page = self.sku_repository.list_skus(&query).await?;
        debug!("Listed {} of {} SKUs", page.records.len(), page.total);
        Ok(page)
    }

    /// Walk every page for the given search.
    pub async fn list_all_skus(
        &self,
        search: Option<String>,
    ) -> Result<Vec<SkuListItem>, SkuServiceError> {
        let mut records = Vec::new();
        let mut page = 1;
        loop {
            let mut query = ListQuery::new(page, self.max_page_size);
            query.search = search.clone();
            let response = self.list_skus(query).await?;
            records.extend(response.records);
            if page as usize >= response.total_pages {
                break;
            }
            page += 1;
        }

        info!("Collected {} SKUs", records.len());
        Ok(records)
    }

    pub async fn get_sku(&self, id: &str) -> Result<Option<SkuDetail>, SkuServiceError> {
        debug!("Looking up SKU {}", id);
        let detail = self.sku_repository.find_by_id(id).await?;
        if detail.is_none() {
            warn!("SKU {} not found", id);
        }
        Ok(detail)
    }

    pub async fn save_sku(&self, request: SaveSkuRequest) -> Result<SkuDetail, SkuServiceError> {
        info!(
            "Saving SKU {} ({})",
            request.sku_code,
            request.id.as_deref().unwrap_or("new")
        );

        request
            .validate()
            .map_err(|e| SkuServiceError::ValidationError {
                message: format!("SKU validation failed: {}", e),
            })?;

        match self.sku_repository.save(request).await {
            Ok(saved) => {
                info!("SKU saved: {} ({})", saved.sku_code, saved.id);
                Ok(saved)
            }
            Err(e) => {
                error!("Failed to save SKU: {}", e);
                Err(SkuServiceError::SaveFailed {
                    reason: e.to_string(),
                })
            }
        }
    }

    pub async fn rename_sku_code(
        &self,
        id: &str,
        new_code: &str,
    ) -> Result<RenameSkuCodeResponse, SkuServiceError> {
        let new_code = new_code.trim();
        if new_code.is_empty() {
            return Err(SkuServiceError::ValidationError {
                message: "SKU Code is required".to_string(),
            });
        }
        if new_code.chars().count() > 100 {
            return Err(SkuServiceError::ValidationError {
                message: "SKU Code must be 1-100 characters".to_string(),
            });
        }

        info!("Renaming SKU {} to {}", id, new_code);
        self.sku_repository
            .rename_code(id, new_code)
            .await
            .map_err(|e| {
                error!("Failed to rename SKU {}: {}", id, e);
                SkuServiceError::RenameFailed {
                    reason: e.to_string(),
                }
            })
    }

    pub async fn list_bundle_types(&self) -> Result<Vec<BundleType>, SkuServiceError> {
        Ok(self.sku_repository.list_bundle_types().await?)
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, SkuServiceError> {
        let mut categories = self.sku_repository.list_categories().await?;
        sort_categories(&mut categories);
        Ok(categories)
    }

    pub async fn list_component_options(
        &self,
        category_id: Option<&str>,
    ) -> Result<Vec<ComponentOption>, SkuServiceError> {
        let options = self.sku_repository.list_component_options().await?;
        Ok(match category_id {
            Some(category_id) => options
                .into_iter()
                .filter(|o| o.category_id == category_id)
                .collect(),
            None => options,
        })
    }

    pub async fn load_catalog(&self) -> Result<Catalog, SkuServiceError> {
        let (bundle_types, categories, component_options) = tokio::try_join!(
            self.list_bundle_types(),
            self.list_categories(),
            self.list_component_options(None),
        )?;

        debug!(
            "Catalog loaded: {} bundle types, {} categories, {} components",
            bundle_types.len(),
            categories.len(),
            component_options.len()
        );

        Ok(Catalog {
            bundle_types,
            categories,
            component_options,
        })
    }

    pub async fn new_editor(&self) -> Result<BundleEditor, SkuServiceError> {
        Ok(BundleEditor::new(self.load_catalog().await?, self.fee_rate))
    }

    /// Editor hydrated from an existing SKU, or `None` when the id is unknown.
    pub async fn edit_sku(&self, id: &str) -> Result<Option<BundleEditor>, SkuServiceError> {
        let detail = match self.get_sku(id).await? {
            Some(detail) => detail,
            None => return Ok(None),
        };
        let catalog = self.load_catalog().await?;
        Ok(Some(BundleEditor::from_detail(&detail, catalog, self.fee_rate)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SortField, SortOrder};
    use crate::utils::config::MockDataset;
    use tokio_test::assert_ok;

    fn service() -> SkuService {
        let config = Config::default();
        SkuService::new(Arc::new(MockSkuRepository::new(MockDataset::Generated)), &config)
    }

    #[tokio::test]
    async fn test_zero_page_size_uses_default() {
        let page = assert_ok!(service().list_skus(ListQuery::new(1, 0)).await);
        assert_eq!(page.page_size, 10);
        assert_eq!(page.records.len(), 10);
    }

    #[tokio::test]
    async fn test_page_size_clamped_to_max() {
        let page = assert_ok!(service().list_skus(ListQuery::new(1, 5000)).await);
        assert_eq!(page.page_size, 100);
        assert_eq!(page.records.len(), 100);
    }

    #[tokio::test]
    async fn test_blank_search_matches_everything() {
        let service = service();
        let all = assert_ok!(service.list_skus(ListQuery::new(1, 10)).await);
        let blank = assert_ok!(service.list_skus(ListQuery::new(1, 10).with_search("   ")).await);
        assert_eq!(all.total, blank.total);
    }

    #[tokio::test]
    async fn test_sorted_listing() {
        let page = assert_ok!(
            service()
                .list_skus(ListQuery::new(1, 50).with_sort(SortField::SellingPrice, SortOrder::Desc))
                .await
        );
        let prices: Vec<Decimal> = page.records.iter().map(|r| r.selling_price).collect();
        assert!(prices.windows(2).all(|w| w[0] >= w[1]));
    }

    #[tokio::test]
    async fn test_save_rejects_invalid_request() {
        let service = service();
        let mut editor = assert_ok!(service.new_editor().await);
        editor.set_sku_code("   ");

        let result = service.save_sku(editor.to_save_request()).await;
        assert!(matches!(result, Err(SkuServiceError::ValidationError { .. })));
    }

    #[tokio::test]
    async fn test_rename_unknown_id_fails() {
        let result = service().rename_sku_code("does-not-exist", "X-1").await;
        assert!(matches!(result, Err(SkuServiceError::RenameFailed { .. })));
    }

    #[tokio::test]
    async fn test_rename_blank_code_is_validation_error() {
        let result = service().rename_sku_code("sku-1", "  ").await;
        assert!(matches!(result, Err(SkuServiceError::ValidationError { .. })));
    }

    #[tokio::test]
    async fn test_component_options_by_category() {
        let service = service();
        let all = assert_ok!(service.list_component_options(None).await);
        let category = all[0].category_id.clone();
        let filtered = assert_ok!(service.list_component_options(Some(&category)).await);
        assert!(!filtered.is_empty());
        assert!(filtered.iter().all(|o| o.category_id == category));
    }

    #[tokio::test]
    async fn test_edit_unknown_sku_is_none() {
        let editor = assert_ok!(service().edit_sku("missing").await);
        assert!(editor.is_none());
    }
}
