//! Catalog backed by a JSON metadata file: an array of
//! `{"id", "author", "width", "height", "url"}` objects.
use crate::memory::MemoryProvider;
use crate::provider::ProviderError;
use crate::types::Image;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Reads the metadata file once and serves it from memory.
pub fn load(path: &Path) -> Result<MemoryProvider, ProviderError> {
    let file = File::open(path)?;
    let images: Vec<Image> = serde_json::from_reader(BufReader::new(file))?;
    let provider = MemoryProvider::new(images)?;

    tracing::info!(path = %path.display(), images = provider.len(), "Loaded catalog");

    Ok(provider)
}
