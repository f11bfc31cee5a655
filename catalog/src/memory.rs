use crate::provider::{ImageProvider, ProviderError};
use crate::seed::seed_index;
use crate::types::{Image, Listing};
use async_trait::async_trait;
use rand::Rng;
use std::collections::HashMap;

/// Catalog held entirely in memory. The image list never changes after
/// construction, so lookups need no locking.
#[derive(Debug)]
pub struct MemoryProvider {
    images: Vec<Image>,
    by_id: HashMap<String, usize>,
}

impl MemoryProvider {
    pub fn new(images: Vec<Image>) -> Result<Self, ProviderError> {
        let mut by_id = HashMap::with_capacity(images.len());
        for (position, image) in images.iter().enumerate() {
            if by_id.insert(image.id.clone(), position).is_some() {
                return Err(ProviderError::DuplicateId(image.id.clone()));
            }
        }

        Ok(MemoryProvider { images, by_id })
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

#[async_trait]
impl ImageProvider for MemoryProvider {
    async fn get(&self, id: &str) -> Result<Image, ProviderError> {
        self.by_id
            .get(id)
            .map(|&position| self.images[position].clone())
            .ok_or(ProviderError::NotFound)
    }

    async fn random(&self) -> Result<Image, ProviderError> {
        if self.images.is_empty() {
            return Err(ProviderError::Empty);
        }
        let position = rand::thread_rng().gen_range(0..self.images.len());
        Ok(self.images[position].clone())
    }

    async fn by_seed(&self, seed: &str) -> Result<Image, ProviderError> {
        let position = seed_index(seed, self.images.len()).ok_or(ProviderError::Empty)?;
        Ok(self.images[position].clone())
    }

    async fn list(&self, offset: usize, limit: usize) -> Result<Listing, ProviderError> {
        let images = self
            .images
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        Ok(Listing {
            images,
            total: self.images.len(),
        })
    }

    async fn list_all(&self) -> Result<Vec<Image>, ProviderError> {
        Ok(self.images.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(n: usize) -> Image {
        let id = n.to_string();
        Image::new(id, "John Doe", 300, 400, "https://picsum.photos")
    }

    fn images(count: usize) -> Vec<Image> {
        (1..=count).map(image).collect()
    }

    #[tokio::test]
    async fn test_get() {
        let provider = MemoryProvider::new(images(2)).unwrap();
        assert_eq!(provider.get("2").await.unwrap().id, "2");
        assert!(matches!(provider.get("3").await, Err(ProviderError::NotFound)));
    }

    #[tokio::test]
    async fn test_duplicate_ids() {
        let mut data = images(2);
        data.push(data[0].clone());
        assert!(matches!(
            MemoryProvider::new(data),
            Err(ProviderError::DuplicateId(id)) if id == "1"
        ));
    }

    #[tokio::test]
    async fn test_random() {
        let provider = MemoryProvider::new(images(3)).unwrap();
        for _ in 0..20 {
            let image = provider.random().await.unwrap();
            assert!(provider.get(&image.id).await.is_ok());
        }

        let empty = MemoryProvider::new(vec![]).unwrap();
        assert!(matches!(empty.random().await, Err(ProviderError::Empty)));
    }

    #[tokio::test]
    async fn test_by_seed() {
        let provider = MemoryProvider::new(images(2)).unwrap();
        assert_eq!(provider.by_seed("1").await.unwrap().id, "2");
        assert_eq!(provider.by_seed("2").await.unwrap().id, "1");
        assert_eq!(
            provider.by_seed("1").await.unwrap(),
            provider.by_seed("1").await.unwrap()
        );

        let empty = MemoryProvider::new(vec![]).unwrap();
        assert!(matches!(empty.by_seed("1").await, Err(ProviderError::Empty)));
    }

    #[tokio::test]
    async fn test_list() {
        let provider = MemoryProvider::new(images(5)).unwrap();

        let page = provider.list(0, 2).await.unwrap();
        assert_eq!(page.total, 5);
        let ids: Vec<_> = page.images.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["1", "2"]);

        let page = provider.list(4, 2).await.unwrap();
        assert_eq!(page.images.len(), 1);

        let page = provider.list(10, 2).await.unwrap();
        assert!(page.images.is_empty());
        assert_eq!(page.total, 5);

        assert_eq!(provider.list_all().await.unwrap().len(), 5);
    }
}
