use async_trait::async_trait;
use serde::Deserialize;

use crate::core::config::CatalogApiConfig;
use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{CategoryPayload, CreateCategoryDto, UpdateCategoryDto};

/// Remote catalog API operations the category service depends on.
///
/// The remote side owns id assignment, persistence, and server-side
/// validation; everything here is request/response plumbing.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<CategoryPayload>>;
    async fn create_category(&self, request: &CreateCategoryDto) -> Result<CategoryPayload>;
    async fn update_category(&self, id: i64, request: &UpdateCategoryDto)
        -> Result<CategoryPayload>;
    async fn delete_category(&self, id: i64) -> Result<()>;
}

/// Error body the catalog API uses for 4xx responses
#[derive(Debug, Deserialize)]
struct CatalogErrorResponse {
    #[serde(default)]
    message: String,
}

/// HTTP client for the remote catalog API (JSON bodies, cookie session)
pub struct CatalogApiClient {
    config: CatalogApiConfig,
    http_client: reqwest::Client,
}

impl CatalogApiClient {
    pub fn new(config: CatalogApiConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            // Session auth rides on cookies
            .cookie_store(true)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    async fn error_from_response(response: reqwest::Response) -> AppError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        let message = serde_json::from_str::<CatalogErrorResponse>(&body)
            .ok()
            .map(|e| e.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("Catalog API error: HTTP {}", status));

        match status.as_u16() {
            404 => AppError::NotFound(message),
            409 => AppError::Conflict(message),
            400 | 422 => AppError::Validation(message),
            _ => {
                tracing::error!("Catalog API error: HTTP {} - {}", status, body);
                AppError::ExternalServiceError(format!("Catalog API error: HTTP {}", status))
            }
        }
    }
}

#[async_trait]
impl CatalogApi for CatalogApiClient {
    async fn list_categories(&self) -> Result<Vec<CategoryPayload>> {
        let url = self.url("/api/categories");
        tracing::debug!("Listing categories from {}", url);

        let response = self.http_client.get(&url).send().await.map_err(|e| {
            tracing::error!("Failed to list categories: {}", e);
            AppError::ExternalServiceError(format!("Failed to list categories: {}", e))
        })?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        response.json::<Vec<CategoryPayload>>().await.map_err(|e| {
            tracing::error!("Failed to parse category listing: {}", e);
            AppError::ExternalServiceError(format!("Failed to parse category listing: {}", e))
        })
    }

    async fn create_category(&self, request: &CreateCategoryDto) -> Result<CategoryPayload> {
        let url = self.url("/api/categories");
        tracing::debug!("Creating category '{}'", request.name);

        let response = self
            .http_client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to create category: {}", e);
                AppError::ExternalServiceError(format!("Failed to create category: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        response.json::<CategoryPayload>().await.map_err(|e| {
            tracing::error!("Failed to parse created category: {}", e);
            AppError::ExternalServiceError(format!("Failed to parse created category: {}", e))
        })
    }

    async fn update_category(
        &self,
        id: i64,
        request: &UpdateCategoryDto,
    ) -> Result<CategoryPayload> {
        let url = self.url(&format!("/api/categories/{}", id));
        tracing::debug!("Updating category {}", id);

        let response = self
            .http_client
            .put(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to update category {}: {}", id, e);
                AppError::ExternalServiceError(format!("Failed to update category: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        response.json::<CategoryPayload>().await.map_err(|e| {
            tracing::error!("Failed to parse updated category: {}", e);
            AppError::ExternalServiceError(format!("Failed to parse updated category: {}", e))
        })
    }

    async fn delete_category(&self, id: i64) -> Result<()> {
        let url = self.url(&format!("/api/categories/{}", id));
        tracing::debug!("Deleting category {}", id);

        let response = self.http_client.delete(&url).send().await.map_err(|e| {
            tracing::error!("Failed to delete category {}: {}", id, e);
            AppError::ExternalServiceError(format!("Failed to delete category: {}", e))
        })?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        // No body expected on a successful delete
        Ok(())
    }
}
