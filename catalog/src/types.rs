use serde::{Deserialize, Serialize};

/// A catalog entry. Field order is the JSON field order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub id: String,
    pub author: String,
    pub width: u32,
    pub height: u32,
    /// Where the original photo was published.
    pub url: String,
}

impl Image {
    pub fn new<I, A, U>(id: I, author: A, width: u32, height: u32, url: U) -> Self
    where
        I: Into<String>,
        A: Into<String>,
        U: Into<String>,
    {
        Image {
            id: id.into(),
            author: author.into(),
            width,
            height,
            url: url.into(),
        }
    }
}

/// One page of the catalog, plus the catalog size at the time of the query.
#[derive(Clone, Debug, PartialEq)]
pub struct Listing {
    pub images: Vec<Image>,
    pub total: usize,
}
