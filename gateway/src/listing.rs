//! JSON shapes and paging for the listing and info endpoints.
use crate::config::ListConfig;
use crate::errors::GatewayError;
use crate::routes::QueryParams;
use catalog::Image;
use serde::Serialize;
use url::Url;

/// An image as returned by `/v2/list` and the info endpoints.
#[derive(Debug, PartialEq, Serialize)]
pub struct ListImage {
    #[serde(flatten)]
    pub image: Image,
    pub download_url: String,
}

impl ListImage {
    pub fn new(image: Image, root_url: &Url) -> Self {
        let download_url = format!(
            "{}/id/{}/{}/{}",
            trimmed(root_url),
            image.id,
            image.width,
            image.height
        );
        ListImage {
            image,
            download_url,
        }
    }
}

/// An image as returned by the deprecated `/list` endpoint.
#[derive(Debug, PartialEq, Serialize)]
pub struct DeprecatedImage {
    pub format: &'static str,
    pub width: u32,
    pub height: u32,
    pub filename: String,
    pub id: i64,
    pub author: String,
    pub author_url: String,
    pub post_url: String,
}

impl TryFrom<Image> for DeprecatedImage {
    type Error = GatewayError;

    /// Fails for images whose identifier is not an integer.
    fn try_from(image: Image) -> Result<Self, Self::Error> {
        let id = image.id.parse::<i64>().map_err(|e| {
            GatewayError::InternalError(format!("Non-numeric image id {:?}: {e}", image.id))
        })?;

        Ok(DeprecatedImage {
            format: "jpeg",
            width: image.width,
            height: image.height,
            filename: format!("{id}.jpeg"),
            id,
            author: image.author,
            author_url: image.url.clone(),
            post_url: image.url,
        })
    }
}

/// Page window requested from `/v2/list`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
}

impl Pagination {
    /// Reads `page` and `limit`. Missing, malformed or zero values fall back
    /// to the first page and the default limit; the limit is capped.
    pub fn from_query(query: &QueryParams, config: &ListConfig) -> Self {
        let page = positive(query.get("page")).unwrap_or(1);
        let limit = positive(query.get("limit"))
            .unwrap_or(config.default_limit)
            .min(config.max_limit);
        Pagination { page, limit }
    }

    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// `Link` header value pointing at the neighbouring pages, if any.
    pub fn link_header(&self, root_url: &Url, total: usize) -> Option<String> {
        let root = trimmed(root_url);
        let mut links = Vec::with_capacity(2);

        if self.page > 1 {
            links.push(format!(
                "<{root}/v2/list?page={}&limit={}>; rel=\"prev\"",
                self.page - 1,
                self.limit
            ));
        }
        if self.offset() < total {
            links.push(format!(
                "<{root}/v2/list?page={}&limit={}>; rel=\"next\"",
                self.page.saturating_add(1),
                self.limit
            ));
        }

        if links.is_empty() {
            None
        } else {
            Some(links.join(", "))
        }
    }
}

fn positive(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|v| v.parse::<usize>().ok())
        .filter(|v| *v >= 1)
}

fn trimmed(url: &Url) -> &str {
    url.as_str().trim_end_matches('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> Url {
        Url::parse("https://example.com").unwrap()
    }

    fn image(id: &str) -> Image {
        Image::new(id, "John Doe", 300, 400, "https://picsum.photos")
    }

    fn pagination(query: &str) -> Pagination {
        Pagination::from_query(&QueryParams::parse(Some(query)), &ListConfig::default())
    }

    #[test]
    fn test_list_image_json() {
        let json = serde_json::to_string(&ListImage::new(image("1"), &root())).unwrap();
        assert_eq!(
            json,
            r#"{"id":"1","author":"John Doe","width":300,"height":400,"url":"https://picsum.photos","download_url":"https://example.com/id/1/300/400"}"#
        );
    }

    #[test]
    fn test_deprecated_image_json() {
        let deprecated = DeprecatedImage::try_from(image("1")).unwrap();
        let json = serde_json::to_string(&deprecated).unwrap();
        assert_eq!(
            json,
            r#"{"format":"jpeg","width":300,"height":400,"filename":"1.jpeg","id":1,"author":"John Doe","author_url":"https://picsum.photos","post_url":"https://picsum.photos"}"#
        );

        assert!(matches!(
            DeprecatedImage::try_from(image("abc")),
            Err(GatewayError::InternalError(_))
        ));
    }

    #[test]
    fn test_pagination_from_query() {
        assert_eq!(pagination(""), Pagination { page: 1, limit: 30 });
        assert_eq!(
            pagination("page=2&limit=1"),
            Pagination { page: 2, limit: 1 }
        );
        assert_eq!(
            pagination("limit=1000"),
            Pagination {
                page: 1,
                limit: 100
            }
        );
        assert_eq!(
            pagination("page=0&limit=0"),
            Pagination { page: 1, limit: 30 }
        );
        assert_eq!(
            pagination("page=-3&limit=x"),
            Pagination { page: 1, limit: 30 }
        );

        let config = ListConfig {
            default_limit: 10,
            max_limit: 20,
        };
        let query = QueryParams::parse(Some("limit=50"));
        assert_eq!(Pagination::from_query(&query, &config).limit, 20);
        assert_eq!(
            Pagination::from_query(&QueryParams::default(), &config).limit,
            10
        );
    }

    #[test]
    fn test_offset() {
        assert_eq!(Pagination { page: 1, limit: 30 }.offset(), 0);
        assert_eq!(Pagination { page: 3, limit: 10 }.offset(), 20);
        assert_eq!(
            Pagination {
                page: usize::MAX,
                limit: 100
            }
            .offset(),
            usize::MAX
        );
    }

    #[test]
    fn test_link_header() {
        let root = root();

        assert_eq!(
            Pagination { page: 1, limit: 30 }
                .link_header(&root, 2)
                .as_deref(),
            Some("<https://example.com/v2/list?page=2&limit=30>; rel=\"next\"")
        );
        assert_eq!(
            Pagination { page: 2, limit: 1 }
                .link_header(&root, 2)
                .as_deref(),
            Some(
                "<https://example.com/v2/list?page=1&limit=1>; rel=\"prev\", <https://example.com/v2/list?page=3&limit=1>; rel=\"next\""
            )
        );
        assert_eq!(
            Pagination { page: 3, limit: 1 }
                .link_header(&root, 2)
                .as_deref(),
            Some("<https://example.com/v2/list?page=2&limit=1>; rel=\"prev\"")
        );
        assert_eq!(
            Pagination { page: 1, limit: 30 }.link_header(&root, 0),
            None
        );
    }
}
