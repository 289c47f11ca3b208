use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    BundleType, Category, ComponentOption, ListQuery, PaginatedResponse, RenameSkuCodeResponse,
    SaveSkuRequest, SkuDetail, SkuListItem,
};

#[derive(Error, Debug)]
pub enum SkuRepositoryError {
    #[error("Not found")]
    NotFound,
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error("API base URL cannot carry path segments: {0}")]
    InvalidEndpoint(String),
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Backend returned {status}: {message}")]
    BackendError { status: u16, message: String },
}

/// Data access for SKUs and the reference data the editor needs.
#[async_trait]
pub trait SkuRepository: Send + Sync {
    async fn list_skus(
        &self,
        query: &ListQuery,
    ) -> Result<PaginatedResponse<SkuListItem>, SkuRepositoryError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<SkuDetail>, SkuRepositoryError>;
    /// Create or update. The returned detail is authoritative.
    async fn save(&self, request: SaveSkuRequest) -> Result<SkuDetail, SkuRepositoryError>;
    async fn rename_code(
        &self,
        id: &str,
        new_code: &str,
    ) -> Result<RenameSkuCodeResponse, SkuRepositoryError>;
    async fn list_bundle_types(&self) -> Result<Vec<BundleType>, SkuRepositoryError>;
    async fn list_categories(&self) -> Result<Vec<Category>, SkuRepositoryError>;
    async fn list_component_options(&self) -> Result<Vec<ComponentOption>, SkuRepositoryError>;
}
