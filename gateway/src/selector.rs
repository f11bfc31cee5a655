use crate::errors::Result;
use catalog::{Image, ImageProvider};

/// How the target image of a request is chosen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    /// Any image, picked anew on every request.
    Random,
    /// The image with this identifier.
    ById(String),
    /// The image a seed maps to in the current catalog.
    BySeed(String),
    /// The image named by the deprecated `?image=` query parameter. Resolves like
    /// `ById`, but keeps the random endpoints' caching.
    LegacyId(String),
}

impl Selector {
    /// Asks the provider for the image this selector points to. A missing
    /// identifier becomes `ImageNotFound`; any other provider failure is passed on.
    pub async fn resolve(&self, provider: &dyn ImageProvider) -> Result<Image> {
        let image = match self {
            Selector::Random => provider.random().await?,
            Selector::ById(id) | Selector::LegacyId(id) => provider.get(id).await?,
            Selector::BySeed(seed) => provider.by_seed(seed).await?,
        };
        Ok(image)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Selector::Random => "random",
            Selector::ById(_) => "id",
            Selector::BySeed(_) => "seed",
            Selector::LegacyId(_) => "legacy_id",
        }
    }
}
