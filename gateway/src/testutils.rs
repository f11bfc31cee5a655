use crate::config::Config;
use async_trait::async_trait;
use catalog::memory::MemoryProvider;
use catalog::{Image, ImageProvider, Listing, ProviderError};
use std::time::Duration;

pub const ROOT_URL: &str = "https://example.com";
pub const IMAGE_SERVICE_URL: &str = "https://i.example.com";
pub const HMAC_KEY: &str = "test";

pub fn fixture_image(id: &str) -> Image {
    Image::new(id, "John Doe", 300, 400, "https://picsum.photos")
}

pub fn single_image_catalog() -> MemoryProvider {
    MemoryProvider::new(vec![fixture_image("1")]).unwrap()
}

pub fn two_image_catalog() -> MemoryProvider {
    MemoryProvider::new(vec![fixture_image("1"), fixture_image("2")]).unwrap()
}

pub fn test_config() -> Config {
    let yaml = format!(
        r#"
listener:
    host: "127.0.0.1"
    port: 8080
admin_listener:
    host: "127.0.0.1"
    port: 8081
root_url: "{ROOT_URL}"
image_service_url: "{IMAGE_SERVICE_URL}"
hmac_key: "{HMAC_KEY}"
timeouts:
    handler_secs: 1
catalog:
    type: inline
    images: []
"#
    );
    serde_yaml::from_str(&yaml).unwrap()
}

/// Fails every query as an unreachable backend would.
pub struct FailingProvider;

#[async_trait]
impl ImageProvider for FailingProvider {
    async fn get(&self, _id: &str) -> Result<Image, ProviderError> {
        Err(ProviderError::Unavailable("mock failure".into()))
    }

    async fn random(&self) -> Result<Image, ProviderError> {
        Err(ProviderError::Unavailable("mock failure".into()))
    }

    async fn by_seed(&self, _seed: &str) -> Result<Image, ProviderError> {
        Err(ProviderError::Unavailable("mock failure".into()))
    }

    async fn list(&self, _offset: usize, _limit: usize) -> Result<Listing, ProviderError> {
        Err(ProviderError::Unavailable("mock failure".into()))
    }

    async fn list_all(&self) -> Result<Vec<Image>, ProviderError> {
        Err(ProviderError::Unavailable("mock failure".into()))
    }
}

/// Answers every query after `delay`, with the single fixture image.
pub struct SlowProvider {
    pub delay: Duration,
}

#[async_trait]
impl ImageProvider for SlowProvider {
    async fn get(&self, _id: &str) -> Result<Image, ProviderError> {
        tokio::time::sleep(self.delay).await;
        Ok(fixture_image("1"))
    }

    async fn random(&self) -> Result<Image, ProviderError> {
        self.get("1").await
    }

    async fn by_seed(&self, _seed: &str) -> Result<Image, ProviderError> {
        self.get("1").await
    }

    async fn list(&self, _offset: usize, _limit: usize) -> Result<Listing, ProviderError> {
        let image = self.get("1").await?;
        Ok(Listing {
            images: vec![image],
            total: 1,
        })
    }

    async fn list_all(&self) -> Result<Vec<Image>, ProviderError> {
        Ok(vec![self.get("1").await?])
    }
}
