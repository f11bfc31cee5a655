pub mod config;
pub mod file;
pub mod memory;
pub mod provider;
pub mod seed;
pub mod types;

use config::CatalogConfig;
use memory::MemoryProvider;
use std::sync::Arc;

pub use provider::{ImageProvider, ProviderError};
pub use types::{Image, Listing};

/// Builds the provider described by the config.
pub fn open(config: &CatalogConfig) -> Result<Arc<dyn ImageProvider>, ProviderError> {
    let provider = match config {
        CatalogConfig::File { path } => file::load(path)?,
        CatalogConfig::Inline { images } => MemoryProvider::new(images.clone())?,
    };

    if provider.is_empty() {
        tracing::warn!("Catalog is empty; random and seed requests will fail");
    }

    Ok(Arc::new(provider))
}
