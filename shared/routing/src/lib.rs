use std::collections::HashMap;

#[derive(Debug)]
enum PathSegment {
    Static(String),
    Param(String),
    Digits(String),
}

#[derive(Debug)]
struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    /// Parses a path pattern string into a Path struct
    /// Supports:
    /// - Static segments: "/v2/list"
    /// - Dynamic parameters: "/id/{id}/info"
    /// - Digit-only parameters: "/{width:digits}/{height:digits}"
    pub fn parse(path_str: &str) -> Self {
        let normalized_path = path_str.trim().trim_matches('/');

        let segments: Vec<PathSegment> = if normalized_path.is_empty() {
            vec![]
        } else {
            normalized_path
                .split('/')
                .map(|s| match s.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                    Some(inner) => match inner.split_once(':') {
                        Some((name, "digits")) => PathSegment::Digits(name.to_string()),
                        Some((name, _)) => PathSegment::Param(name.to_string()),
                        None => PathSegment::Param(inner.to_string()),
                    },
                    None => PathSegment::Static(s.to_string()),
                })
                .collect()
        };

        Path { segments }
    }

    /// Matches a request path against this path pattern.
    /// Only the leading slash is ignored; an empty segment (e.g. from a trailing
    /// slash) never matches a parameter.
    /// Returns Some(params) if match succeeds, None otherwise
    fn matches(&self, request_path: &str) -> Option<HashMap<String, String>> {
        let normalized_path = request_path.strip_prefix('/').unwrap_or(request_path);

        let request_segments: Vec<&str> = if normalized_path.is_empty() {
            vec![]
        } else {
            normalized_path.split('/').collect()
        };

        if request_segments.len() != self.segments.len() {
            return None;
        }

        let mut params = HashMap::new();

        for (seg, req_segment) in self.segments.iter().zip(request_segments) {
            match seg {
                PathSegment::Static(s) => {
                    if req_segment != s {
                        return None;
                    }
                }
                PathSegment::Param(name) => {
                    if req_segment.is_empty() {
                        return None;
                    }
                    params.insert(name.clone(), req_segment.to_string());
                }
                PathSegment::Digits(name) => {
                    if req_segment.is_empty() || !req_segment.bytes().all(|b| b.is_ascii_digit())
                    {
                        return None;
                    }
                    params.insert(name.clone(), req_segment.to_string());
                }
            }
        }

        Some(params)
    }
}

/// Decodes `%XX` escapes in a request path. Malformed escapes are kept
/// verbatim, and the result falls back to the raw segment when the decoded bytes
/// are not valid UTF-8.
pub fn percent_decode(segment: &str) -> String {
    let bytes = segment.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let hi = (bytes[i + 1] as char).to_digit(16);
            let lo = (bytes[i + 2] as char).to_digit(16);
            if let (Some(hi), Some(lo)) = (hi, lo) {
                out.push(((hi << 4) | lo) as u8);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }

    String::from_utf8(out).unwrap_or_else(|_| segment.to_string())
}

#[derive(Debug, PartialEq)]
pub struct RouteMatch<'a, A> {
    pub params: HashMap<String, String>,
    pub action: &'a A,
}

impl<A> RouteMatch<'_, A> {
    /// Returns a captured parameter, or an empty string if the pattern had none by that name.
    pub fn param(&self, name: &str) -> &str {
        self.params
            .get(name)
            .map(String::as_str)
            .unwrap_or_default()
    }
}

#[derive(Debug)]
pub struct Route<A> {
    path: Path,
    action: A,
}

impl<A> Route<A> {
    /// Creates a new Route with the given path pattern and action
    pub fn new(path: &str, action: A) -> Self {
        Self {
            path: Path::parse(path),
            action,
        }
    }

    /// Returns Some(RouteMatch) if the request path matches this route, None otherwise.
    pub fn matches(&self, request_path: &str) -> Option<RouteMatch<'_, A>> {
        let params = self.path.matches(request_path)?;
        Some(RouteMatch {
            params,
            action: &self.action,
        })
    }
}

/// An ordered table of routes. Earlier routes take priority.
pub struct RouteTable<A> {
    routes: Vec<Route<A>>,
}

impl<A> RouteTable<A> {
    pub fn new(routes: Vec<Route<A>>) -> Self {
        Self { routes }
    }

    /// Matches the request path to a route, and returns the first matched route if any.
    pub fn resolve(&self, path: &str) -> Option<RouteMatch<'_, A>> {
        self.routes.iter().find_map(|route| route.matches(path))
    }
}
