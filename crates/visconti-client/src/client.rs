//! Backend fetch client.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use visconti_commerce::catalog::{GalleryImage, MenuResponse};
use visconti_commerce::offer::OfferBadge;

use crate::config::BackendConfig;

/// Error type for fetch operations.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error: {status} for {url}")]
    Http { status: u16, url: String },

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("API response is not in the expected format: {0}")]
    UnexpectedFormat(String),

    #[error("Request error: {0}")]
    Request(String),
}

impl FetchError {
    fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(err.to_string())
        } else if err.is_connect() {
            FetchError::Connection(err.to_string())
        } else if err.is_decode() {
            FetchError::Deserialization(err.to_string())
        } else {
            FetchError::Request(err.to_string())
        }
    }
}

/// Read-only access to the backend's public collections.
#[async_trait]
pub trait MenuSource: Send + Sync {
    /// `GET api/menu`.
    async fn fetch_menu(&self) -> Result<MenuResponse, FetchError>;

    /// `GET api/images`.
    async fn fetch_images(&self) -> Result<Vec<GalleryImage>, FetchError>;

    /// `GET api/offer-badges`.
    async fn fetch_offers(&self) -> Result<Vec<OfferBadge>, FetchError>;
}

/// HTTP client for the storefront backend.
///
/// One attempt per call; retrying is left to the user.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: HttpClient,
    config: BackendConfig,
}

impl ApiClient {
    /// Create a client for `config`.
    pub fn new(config: BackendConfig) -> Result<Self, FetchError> {
        let http = HttpClient::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(FetchError::from_reqwest)?;
        Ok(Self { http, config })
    }

    /// Create a client for the backend named in the environment.
    pub fn from_env() -> Result<Self, FetchError> {
        Self::new(BackendConfig::from_env())
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// GET `api/<path>` and parse the body as JSON.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = self.config.endpoint(path);
        debug!(url = %url, "fetching");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                url,
            });
        }

        let bytes = response.bytes().await.map_err(FetchError::from_reqwest)?;
        serde_json::from_slice(&bytes).map_err(|e| FetchError::Deserialization(e.to_string()))
    }
}

#[async_trait]
impl MenuSource for ApiClient {
    async fn fetch_menu(&self) -> Result<MenuResponse, FetchError> {
        let body: serde_json::Value = self.get_json("menu").await?;
        let menu = parse_menu(body)?;
        info!(
            categories = menu.grouped_items.len(),
            items = menu.item_count(),
            "Fetched menu"
        );
        Ok(menu)
    }

    async fn fetch_images(&self) -> Result<Vec<GalleryImage>, FetchError> {
        let images: Vec<GalleryImage> = self.get_json("images").await?;
        info!(count = images.len(), "Fetched gallery images");
        Ok(images)
    }

    async fn fetch_offers(&self) -> Result<Vec<OfferBadge>, FetchError> {
        let offers: Vec<OfferBadge> = self.get_json("offer-badges").await?;
        info!(count = offers.len(), "Fetched offers");
        Ok(offers)
    }
}

/// Check the menu envelope before parsing the items inside it.
pub fn parse_menu(body: serde_json::Value) -> Result<MenuResponse, FetchError> {
    if !body.get("groupedItems").is_some_and(serde_json::Value::is_object) {
        return Err(FetchError::UnexpectedFormat(
            "missing groupedItems object".to_string(),
        ));
    }
    serde_json::from_value(body).map_err(|e| FetchError::Deserialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_menu_requires_grouped_items() {
        let err = parse_menu(json!({"items": []})).unwrap_err();
        assert!(matches!(err, FetchError::UnexpectedFormat(_)));

        let err = parse_menu(json!({"groupedItems": []})).unwrap_err();
        assert!(matches!(err, FetchError::UnexpectedFormat(_)));
    }

    #[test]
    fn test_parse_menu_bad_item_is_deserialization_error() {
        let err = parse_menu(json!({"groupedItems": {"pizze": [{"name": "No id", "price": 5}]}}))
            .unwrap_err();
        assert!(matches!(err, FetchError::Deserialization(_)));
    }

    #[test]
    fn test_parse_menu() {
        let menu = parse_menu(json!({
            "groupedItems": {"bibite": [{"_id": "d1", "name": "Acqua", "price": 1.5}]}
        }))
        .unwrap();
        assert_eq!(menu.item_count(), 1);
    }

    #[test]
    fn test_error_messages() {
        let err = FetchError::Http {
            status: 503,
            url: "http://localhost:5000/api/menu".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP error: 503 for http://localhost:5000/api/menu");
    }
}
