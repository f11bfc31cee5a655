use crate::selector::Selector;
use hyper::header::HeaderValue;

pub const NO_CACHE: &str = "private, no-cache, no-store, must-revalidate";
pub const CACHEABLE: &str =
    "public, max-age=86400, stale-while-revalidate=60, stale-if-error=43200";

/// Cache-Control directive attached to a response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CachePolicy {
    /// The same URL may produce a different answer next time.
    Private,
    /// The URL always produces the same answer while the catalog is unchanged.
    Public,
}

impl CachePolicy {
    pub fn for_selector(selector: &Selector) -> Self {
        match selector {
            Selector::ById(_) | Selector::BySeed(_) => CachePolicy::Public,
            Selector::Random | Selector::LegacyId(_) => CachePolicy::Private,
        }
    }

    pub fn header_value(self) -> HeaderValue {
        match self {
            CachePolicy::Private => HeaderValue::from_static(NO_CACHE),
            CachePolicy::Public => HeaderValue::from_static(CACHEABLE),
        }
    }
}

/// Returns the local redirect target for a path with a trailing slash, or `None`
/// if the path has none. The query string is carried over. Leading slashes are
/// collapsed so the target can never be a protocol-relative URL.
pub fn trailing_slash_redirect(path: &str, query: Option<&str>) -> Option<String> {
    if path.len() <= 1 || !path.ends_with('/') {
        return None;
    }

    let stripped = path.trim_end_matches('/').trim_start_matches('/');
    let location = match query {
        Some(query) => format!("/{stripped}?{query}"),
        None => format!("/{stripped}"),
    };
    Some(location)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_for_selector() {
        assert_eq!(
            CachePolicy::for_selector(&Selector::Random),
            CachePolicy::Private
        );
        assert_eq!(
            CachePolicy::for_selector(&Selector::LegacyId("1".into())),
            CachePolicy::Private
        );
        assert_eq!(
            CachePolicy::for_selector(&Selector::ById("1".into())),
            CachePolicy::Public
        );
        assert_eq!(
            CachePolicy::for_selector(&Selector::BySeed("1".into())),
            CachePolicy::Public
        );

        assert_eq!(CachePolicy::Public.header_value(), CACHEABLE);
        assert_eq!(CachePolicy::Private.header_value(), NO_CACHE);
    }

    #[test]
    fn test_trailing_slash_redirect() {
        assert_eq!(trailing_slash_redirect("/", None), None);
        assert_eq!(trailing_slash_redirect("/200", None), None);
        assert_eq!(
            trailing_slash_redirect("/200/", None).as_deref(),
            Some("/200")
        );
        assert_eq!(
            trailing_slash_redirect("/id/1/200/120/", Some("blur")).as_deref(),
            Some("/id/1/200/120?blur")
        );
        assert_eq!(
            trailing_slash_redirect("/seed/1/200//", None).as_deref(),
            Some("/seed/1/200")
        );
        assert_eq!(
            trailing_slash_redirect("//evil.example.com/", None).as_deref(),
            Some("/evil.example.com")
        );
    }
}
