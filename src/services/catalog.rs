use crate::models::{BudgetRange, Product, ProductCategory, Species};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the marketplace catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Marketplace catalog client
///
/// Fetches candidate products from the PetSuite backend. A single best-effort
/// attempt per call; retry policy is the caller's concern.
pub struct CatalogClient {
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

impl CatalogClient {
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            client,
        }
    }

    /// Fetch active candidate products for a species, optionally narrowed by
    /// category and price range
    pub async fn find_candidates(
        &self,
        species: Species,
        category: Option<ProductCategory>,
        budget: Option<BudgetRange>,
        limit: usize,
    ) -> Result<Vec<Product>, CatalogError> {
        let mut url = format!(
            "{}/api/products?status=active&species={}&limit={}",
            self.base_url.trim_end_matches('/'),
            species,
            limit
        );

        if let Some(category) = category {
            url.push_str(&format!("&category={}", category));
        }
        if let Some(budget) = budget {
            url.push_str(&format!("&minPrice={}&maxPrice={}", budget.min, budget.max));
        }

        tracing::debug!("Fetching candidates from: {}", url);

        let mut request = self.client.get(&url);
        if let Some(api_key) = &self.api_key {
            request = request.header("X-Api-Key", api_key);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(CatalogError::ApiError(format!(
                "Failed to fetch candidates: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        if json.get("success").and_then(Value::as_bool) == Some(false) {
            let message = json
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("unknown error");
            return Err(CatalogError::ApiError(message.to_string()));
        }

        let documents = json
            .get("data")
            .and_then(Value::as_array)
            .ok_or_else(|| CatalogError::InvalidResponse("Missing data array".into()))?;

        // Documents that fail to deserialize are dropped, not fatal
        let products: Vec<Product> = documents
            .iter()
            .filter_map(|doc| serde_json::from_value(doc.clone()).ok())
            .collect();

        tracing::debug!(
            "Queried {} candidates ({} documents)",
            products.len(),
            documents.len()
        );

        Ok(products)
    }
}
