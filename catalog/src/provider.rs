use crate::types::{Image, Listing};
use async_trait::async_trait;
use std::io;

#[derive(thiserror::Error, Debug)]
pub enum ProviderError {
    #[error("image not found")]
    NotFound,

    #[error("the catalog is empty")]
    Empty,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid catalog data: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("duplicate image id in catalog: {0}")]
    DuplicateId(String),

    #[error("provider unavailable: {0}")]
    Unavailable(String),
}

/// Read-only queries over the image catalog.
///
/// Implementations are shared between all in-flight requests and must be safe
/// for concurrent use.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Looks up a single image by its identifier.
    async fn get(&self, id: &str) -> Result<Image, ProviderError>;

    /// Picks an image uniformly at random.
    async fn random(&self) -> Result<Image, ProviderError>;

    /// Picks the image a seed maps to, see [`crate::seed::seed_index`].
    async fn by_seed(&self, seed: &str) -> Result<Image, ProviderError>;

    /// Returns at most `limit` images starting at `offset`, in catalog order.
    async fn list(&self, offset: usize, limit: usize) -> Result<Listing, ProviderError>;

    /// Returns the whole catalog in catalog order.
    async fn list_all(&self) -> Result<Vec<Image>, ProviderError>;
}
