use async_trait::async_trait;
use serde::de::DeserializeOwned;

use shopfront_catalog::{Catalog, Product, ProductList};
use shopfront_checkout::{FinalOrder, OrderConfirmation};

use crate::config::ApiConfig;
use crate::error::ApiError;

/// The two remote operations the storefront needs.
///
/// Futures are `?Send`: the storefront runs on a single thread and drives
/// these from its own event loop.
#[async_trait(?Send)]
pub trait ShopApi {
    /// Fetch the full catalog.
    async fn product_list(&self) -> Result<Catalog, ApiError>;

    /// Submit an order.
    async fn order_products(&self, order: &FinalOrder) -> Result<OrderConfirmation, ApiError>;
}

/// HTTP/JSON client for the storefront API.
#[derive(Debug, Clone)]
pub struct HttpShopApi {
    client: reqwest::Client,
    config: ApiConfig,
}

impl HttpShopApi {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_url, path.trim_start_matches('/'))
    }

    async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Api(status.as_u16(), error_message(&body)));
        }
        resp.json().await.map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[async_trait(?Send)]
impl ShopApi for HttpShopApi {
    async fn product_list(&self) -> Result<Catalog, ApiError> {
        let url = self.url("/product/");
        tracing::debug!(%url, "fetching product list");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let list: ProductList = Self::read_json(resp).await?;

        Ok(list
            .into_catalog()
            .into_iter()
            .map(|p| with_cdn(&self.config.cdn_url, p))
            .collect::<Vec<_>>()
            .into())
    }

    async fn order_products(&self, order: &FinalOrder) -> Result<OrderConfirmation, ApiError> {
        let url = self.url("/order");
        tracing::debug!(%url, items = order.items.len(), total = order.total, "posting order");

        let resp = self
            .client
            .post(&url)
            .json(order)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::read_json(resp).await
    }
}

/// Resolve a product's image path against the CDN base URL.
///
/// Absolute URLs are left alone.
pub fn with_cdn(cdn_url: &str, mut product: Product) -> Product {
    if !product.image.starts_with("http://") && !product.image.starts_with("https://") {
        product.image = format!(
            "{}/{}",
            cdn_url.trim_end_matches('/'),
            product.image.trim_start_matches('/')
        );
    }
    product
}

/// Best human-readable message from an error response body: the JSON
/// `error` field if there is one, otherwise the raw body.
pub fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_core::ProductId;

    fn product(image: &str) -> Product {
        Product {
            id: ProductId::new("854cef69").unwrap(),
            title: "+1 час в сутках".to_string(),
            description: String::new(),
            image: image.to_string(),
            category: "другое".to_string(),
            price: Some(750),
        }
    }

    #[test]
    fn image_paths_are_resolved_against_the_cdn() {
        let p = with_cdn("https://larek.example/content/weblarek/", product("/5_Dots.svg"));
        assert_eq!(p.image, "https://larek.example/content/weblarek/5_Dots.svg");

        let p = with_cdn("https://cdn", product("https://elsewhere/x.png"));
        assert_eq!(p.image, "https://elsewhere/x.png");
    }

    #[test]
    fn error_message_prefers_json_error_field() {
        assert_eq!(error_message(r#"{"error": "Неверная сумма заказа"}"#), "Неверная сумма заказа");
        assert_eq!(error_message("Bad Gateway\n"), "Bad Gateway");
        assert_eq!(error_message(r#"{"message": "x"}"#), r#"{"message": "x"}"#);
    }

    #[test]
    fn urls_are_joined_under_the_api_base() {
        let api = HttpShopApi::new(ApiConfig::new("https://larek.example")).unwrap();
        assert_eq!(api.url("/product/"), "https://larek.example/api/weblarek/product/");
        assert_eq!(api.url("order"), "https://larek.example/api/weblarek/order");
    }
}
