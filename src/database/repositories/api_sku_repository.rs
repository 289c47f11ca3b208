use async_trait::async_trait;
use reqwest::StatusCode;

use super::sku_repository::{SkuRepository, SkuRepositoryError};
use crate::database::ApiClient;
use crate::models::{
    BundleType, Category, ComponentOption, ListQuery, PaginatedResponse, RenameSkuCodeRequest,
    RenameSkuCodeResponse, SaveSkuRequest, SkuDetail, SkuListItem,
};
use crate::utils::config::Config;

/// REST implementation of SkuRepository
pub struct ApiSkuRepository {
    api: ApiClient,
}

impl ApiSkuRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn from_config(config: &Config) -> Result<Self, SkuRepositoryError> {
        Ok(Self::new(ApiClient::from_url(&config.api_base_url, config.api_timeout)?))
    }

    fn list_request(&self, query: &ListQuery) -> Result<reqwest::RequestBuilder, SkuRepositoryError> {
        let url = self.api.endpoint(&["skus"])?;
        Ok(self.api.http().get(url).query(query))
    }
}

#[async_trait]
impl SkuRepository for ApiSkuRepository {
    async fn list_skus(
        &self,
        query: &ListQuery,
    ) -> Result<PaginatedResponse<SkuListItem>, SkuRepositoryError> {
        let response = self.list_request(query)?.send().await?;
        let response = ApiClient::check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<SkuDetail>, SkuRepositoryError> {
        let url = self.api.endpoint(&["skus", id])?;
        let response = self.api.http().get(url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = ApiClient::check_status(response).await?;
        Ok(response.json::<Option<SkuDetail>>().await?)
    }

    async fn save(&self, request: SaveSkuRequest) -> Result<SkuDetail, SkuRepositoryError> {
        let url = self.api.endpoint(&["skus"])?;
        let response = self.api.http().post(url).json(&request).send().await?;
        let response = ApiClient::check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn rename_code(
        &self,
        id: &str,
        new_code: &str,
    ) -> Result<RenameSkuCodeResponse, SkuRepositoryError> {
        let url = self.api.endpoint(&["skus", id, "code"])?;
        let body = RenameSkuCodeRequest {
            sku_code: new_code.to_string(),
        };
        let response = self.api.http().patch(url).json(&body).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(SkuRepositoryError::NotFound);
        }

        let response = ApiClient::check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn list_bundle_types(&self) -> Result<Vec<BundleType>, SkuRepositoryError> {
        self.api.get_json(&["bundle-types"]).await
    }

    async fn list_categories(&self) -> Result<Vec<Category>, SkuRepositoryError> {
        self.api.get_json(&["categories"]).await
    }

    async fn list_component_options(&self) -> Result<Vec<ComponentOption>, SkuRepositoryError> {
        self.api.get_json(&["components"]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SortField, SortOrder};
    use std::time::Duration;

    fn repository(base: &str) -> ApiSkuRepository {
        ApiSkuRepository::new(ApiClient::from_url(base, Duration::from_secs(1)).unwrap())
    }

    #[test]
    fn test_list_query_string() {
        let repo = repository("http://localhost:8080/api");
        let query = ListQuery::new(2, 25)
            .with_search("rokinon 16")
            .with_sort(SortField::SellingPrice, SortOrder::Desc);

        let request = repo.list_request(&query).unwrap().build().unwrap();
        assert_eq!(request.url().path(), "/api/skus");
        assert_eq!(
            request.url().query(),
            Some("page=2&pageSize=25&search=rokinon+16&sortBy=sellingPrice&sortOrder=desc")
        );
    }

    #[test]
    fn test_list_query_omits_unset_params() {
        let repo = repository("http://localhost:8080/api");
        let request = repo.list_request(&ListQuery::new(1, 10)).unwrap().build().unwrap();
        assert_eq!(request.url().query(), Some("page=1&pageSize=10"));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_an_http_error() {
        let repo = repository("http://127.0.0.1:9/api");
        let result = repo.find_by_id("sku-1").await;
        assert!(matches!(result, Err(SkuRepositoryError::HttpError(_))));
    }
}
