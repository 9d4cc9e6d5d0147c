//! 商品 REST API 客户端
//!
//! 每次调用只尝试一次，不重试，不设超时。

use crate::app::catalog::model::{Product, ProductDraft, ProductId};
use crate::core::error::NetworkError;
use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

/// 默认的商品资源地址
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/products";

/// 商品资源的四个操作
#[async_trait]
pub trait ProductApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Product>, NetworkError>;
    async fn create(&self, draft: &ProductDraft) -> Result<Product, NetworkError>;
    async fn update(&self, id: &ProductId, product: &Product) -> Result<Product, NetworkError>;
    async fn delete(&self, id: &ProductId) -> Result<(), NetworkError>;
}

/// 基于 reqwest 的实现
#[derive(Debug, Clone)]
pub struct HttpProductApi {
    client: Client,
    base_url: Url,
}

impl HttpProductApi {
    pub fn new(base_url: &str) -> Result<Self, NetworkError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self, NetworkError> {
        let url = Url::parse(base_url).map_err(|e| NetworkError::InvalidUrl(e.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(NetworkError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self {
            client,
            base_url: url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/{id}`，id 作为转义后的路径段追加
    fn item_url(&self, id: &ProductId) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&id.to_string());
        }
        url
    }

    fn check(method: &'static str, response: Response) -> Result<Response, NetworkError> {
        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::Status {
                method,
                url: response.url().to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    async fn json<T: DeserializeOwned>(response: Response) -> Result<T, NetworkError> {
        response
            .json::<T>()
            .await
            .map_err(|e| NetworkError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ProductApi for HttpProductApi {
    async fn list(&self) -> Result<Vec<Product>, NetworkError> {
        debug!("GET {}", self.base_url);
        let response = self.client.get(self.base_url.clone()).send().await?;
        let response = Self::check("GET", response)?;
        let products: Vec<Product> = Self::json(response).await?;
        info!("从 API 获取到 {} 个商品", products.len());
        Ok(products)
    }

    async fn create(&self, draft: &ProductDraft) -> Result<Product, NetworkError> {
        debug!("POST {}", self.base_url);
        let response = self
            .client
            .post(self.base_url.clone())
            .json(draft)
            .send()
            .await?;
        let response = Self::check("POST", response)?;
        Self::json(response).await
    }

    async fn update(&self, id: &ProductId, product: &Product) -> Result<Product, NetworkError> {
        let url = self.item_url(id);
        debug!("PUT {}", url);
        let response = self.client.put(url).json(product).send().await?;
        let response = Self::check("PUT", response)?;
        Self::json(response).await
    }

    async fn delete(&self, id: &ProductId) -> Result<(), NetworkError> {
        let url = self.item_url(id);
        debug!("DELETE {}", url);
        let response = self.client.delete(url).send().await?;
        Self::check("DELETE", response)?;
        Ok(())
    }
}
