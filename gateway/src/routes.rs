//! Maps request paths onto the endpoints the gateway serves.
use crate::errors::{GatewayError, Result};
use crate::selector::Selector;
use routing::{Route, RouteMatch, RouteTable};
use url::form_urlencoded;

/// Decoded query string. Keys may repeat; lookups return the first value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn parse(query: Option<&str>) -> Self {
        let pairs = query
            .map(|q| form_urlencoded::parse(q.as_bytes()).into_owned().collect())
            .unwrap_or_default();
        QueryParams { pairs }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// An image request as it appeared on the wire, before validation.
#[derive(Clone, Debug, PartialEq)]
pub struct RawImageRequest {
    pub selector: Selector,
    pub width: String,
    pub height: String,
    /// Everything from the first `.` of the last path segment, or empty.
    pub extension: String,
    pub blur: Option<String>,
    pub grayscale: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Endpoint {
    List,
    DeprecatedList,
    Info(Selector),
    Image(RawImageRequest),
}

#[derive(Clone, Copy, Debug)]
enum JsonShape {
    List,
    DeprecatedList,
    IdInfo,
    SeedInfo,
}

#[derive(Clone, Copy, Debug)]
enum ImageShape {
    Grayscale,
    Random,
    ById,
    BySeed,
}

pub struct Matcher {
    json_routes: RouteTable<JsonShape>,
    image_routes: RouteTable<ImageShape>,
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Matcher {
    pub fn new() -> Self {
        let json_routes = RouteTable::new(vec![
            Route::new("/v2/list", JsonShape::List),
            Route::new("/list", JsonShape::DeprecatedList),
            Route::new("/id/{id}/info", JsonShape::IdInfo),
            Route::new("/seed/{seed}/info", JsonShape::SeedInfo),
        ]);

        let image_routes = RouteTable::new(vec![
            Route::new("/g/{size:digits}", ImageShape::Grayscale),
            Route::new("/g/{width:digits}/{height:digits}", ImageShape::Grayscale),
            Route::new("/{size:digits}", ImageShape::Random),
            Route::new("/{width:digits}/{height:digits}", ImageShape::Random),
            Route::new("/id/{id}/{size:digits}", ImageShape::ById),
            Route::new("/id/{id}/{width:digits}/{height:digits}", ImageShape::ById),
            Route::new("/seed/{seed}/{size:digits}", ImageShape::BySeed),
            Route::new(
                "/seed/{seed}/{width:digits}/{height:digits}",
                ImageShape::BySeed,
            ),
        ]);

        Matcher {
            json_routes,
            image_routes,
        }
    }

    /// Resolves a path and its query into an endpoint, or `RouteNotFound`.
    /// Resolves a raw request path. Escapes are decoded once, before matching.
    pub fn resolve(&self, path: &str, query: &QueryParams) -> Result<Endpoint> {
        let path = routing::percent_decode(path);
        if let Some(route_match) = self.json_routes.resolve(&path) {
            let endpoint = match route_match.action {
                JsonShape::List => Endpoint::List,
                JsonShape::DeprecatedList => Endpoint::DeprecatedList,
                JsonShape::IdInfo => {
                    Endpoint::Info(Selector::ById(route_match.param("id").into()))
                }
                JsonShape::SeedInfo => {
                    Endpoint::Info(Selector::BySeed(route_match.param("seed").into()))
                }
            };
            return Ok(endpoint);
        }

        let (stripped, extension) = split_extension(&path);
        let route_match = self
            .image_routes
            .resolve(stripped)
            .ok_or(GatewayError::RouteNotFound)?;

        Ok(Endpoint::Image(image_request(&route_match, extension, query)))
    }
}

fn image_request(
    route_match: &RouteMatch<'_, ImageShape>,
    extension: &str,
    query: &QueryParams,
) -> RawImageRequest {
    let legacy_id = query
        .get("image")
        .filter(|id| !id.is_empty())
        .map(|id| Selector::LegacyId(id.to_string()));

    let (selector, force_grayscale) = match route_match.action {
        ImageShape::Grayscale => (legacy_id.unwrap_or(Selector::Random), true),
        ImageShape::Random => (legacy_id.unwrap_or(Selector::Random), false),
        ImageShape::ById => (Selector::ById(route_match.param("id").into()), false),
        ImageShape::BySeed => (Selector::BySeed(route_match.param("seed").into()), false),
    };

    let (width, height) = match route_match.params.get("size") {
        Some(size) => (size.clone(), size.clone()),
        None => (
            route_match.param("width").to_string(),
            route_match.param("height").to_string(),
        ),
    };

    RawImageRequest {
        selector,
        width,
        height,
        extension: extension.to_string(),
        blur: query.get("blur").map(str::to_string),
        grayscale: force_grayscale || query.contains("grayscale"),
    }
}

/// Splits the final path segment at its first `.`.
fn split_extension(path: &str) -> (&str, &str) {
    let last_segment_start = path.rfind('/').map(|i| i + 1).unwrap_or(0);
    match path[last_segment_start..].find('.') {
        Some(dot) => path.split_at(last_segment_start + dot),
        None => (path, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(uri: &str) -> Result<Endpoint> {
        let (path, query) = match uri.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (uri, None),
        };
        Matcher::new().resolve(path, &QueryParams::parse(query))
    }

    fn image(uri: &str) -> RawImageRequest {
        match resolve(uri).unwrap() {
            Endpoint::Image(request) => request,
            other => panic!("{uri} resolved to {other:?}"),
        }
    }

    #[test]
    fn test_query_params() {
        let query = QueryParams::parse(Some("blur&grayscale=&blur=3&image=a%20b"));
        assert_eq!(query.get("blur"), Some(""));
        assert!(query.contains("grayscale"));
        assert_eq!(query.get("image"), Some("a b"));
        assert!(!query.contains("page"));

        assert_eq!(QueryParams::parse(None), QueryParams::default());
    }

    #[test]
    fn test_json_shapes() {
        assert_eq!(resolve("/v2/list").unwrap(), Endpoint::List);
        assert_eq!(resolve("/list").unwrap(), Endpoint::DeprecatedList);
        assert_eq!(
            resolve("/id/1/info").unwrap(),
            Endpoint::Info(Selector::ById("1".into()))
        );
        assert_eq!(
            resolve("/seed/hello%20world/info").unwrap(),
            Endpoint::Info(Selector::BySeed("hello world".into()))
        );
    }

    #[test]
    fn test_image_shapes() {
        let request = image("/200");
        assert_eq!(request.selector, Selector::Random);
        assert_eq!(
            (request.width.as_str(), request.height.as_str()),
            ("200", "200")
        );
        assert_eq!(request.extension, "");
        assert!(!request.grayscale);

        let request = image("/200/300.webp?blur=3");
        assert_eq!(
            (request.width.as_str(), request.height.as_str()),
            ("200", "300")
        );
        assert_eq!(request.extension, ".webp");
        assert_eq!(request.blur.as_deref(), Some("3"));

        let request = image("/id/1.5/200/300.jpg");
        assert_eq!(request.selector, Selector::ById("1.5".into()));
        assert_eq!(request.extension, ".jpg");

        let request = image("/seed/picsum/200?grayscale");
        assert_eq!(request.selector, Selector::BySeed("picsum".into()));
        assert!(request.grayscale);

        let request = image("/id/1/200.tar.gz");
        assert_eq!(request.extension, ".tar.gz");
    }

    #[test]
    fn test_escaped_paths() {
        let request = image("/%32%30%30");
        assert_eq!(request.selector, Selector::Random);
        assert_eq!(
            (request.width.as_str(), request.height.as_str()),
            ("200", "200")
        );

        let request = image("/200%2Ejpg");
        assert_eq!(request.width, "200");
        assert_eq!(request.extension, ".jpg");

        let request = image("/id/%31/200/300%2Ewebp");
        assert_eq!(request.selector, Selector::ById("1".into()));
        assert_eq!(request.extension, ".webp");

        assert_eq!(resolve("/v2/%6Cist").unwrap(), Endpoint::List);
    }

    #[test]
    fn test_deprecated_shapes() {
        let request = image("/g/200");
        assert_eq!(request.selector, Selector::Random);
        assert!(request.grayscale);

        let request = image("/g/200/300.webp?image=1");
        assert_eq!(request.selector, Selector::LegacyId("1".into()));
        assert!(request.grayscale);

        let request = image("/200?image=1");
        assert_eq!(request.selector, Selector::LegacyId("1".into()));
        assert!(!request.grayscale);

        // An empty legacy id is ignored
        assert_eq!(image("/200?image=").selector, Selector::Random);

        // The legacy parameter only applies to the random shapes
        assert_eq!(
            image("/id/2/200?image=1").selector,
            Selector::ById("2".into())
        );
    }

    #[test]
    fn test_unmatched() {
        for uri in [
            "/",
            "/asdf",
            "/asdf.jpg",
            "/-1",
            "/200/300/400",
            "/id/1",
            "/id/1/info.jpg",
            "/seed//200",
            "/v2/list/",
            "/g/abc",
        ] {
            assert!(
                matches!(resolve(uri), Err(GatewayError::RouteNotFound)),
                "{uri} should not match"
            );
        }
    }

    #[test]
    fn test_split_extension() {
        assert_eq!(split_extension("/200"), ("/200", ""));
        assert_eq!(split_extension("/200.jpg"), ("/200", ".jpg"));
        assert_eq!(split_extension("/id/a.b/200"), ("/id/a.b/200", ""));
        assert_eq!(split_extension("/id/1/200/300."), ("/id/1/200/300", "."));
    }
}
