use crate::cache_policy::CachePolicy;
use crate::errors::{GatewayError, Result};
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::header::{
    ACCESS_CONTROL_EXPOSE_HEADERS, CACHE_CONTROL, CONTENT_TYPE, HeaderValue, LINK, LOCATION,
};
use hyper::{Response, StatusCode};
use serde::Serialize;

pub type GatewayBody = BoxBody<Bytes, GatewayError>;

fn full<T: Into<Bytes>>(chunk: T) -> GatewayBody {
    Full::new(chunk.into()).map_err(|e| match e {}).boxed()
}

/// Serializes `value` followed by a newline. Listing and info responses are never cached.
pub fn json_response<T: Serialize>(value: &T) -> Result<Response<GatewayBody>> {
    let mut body = serde_json::to_vec(value)
        .map_err(|e| GatewayError::InternalError(format!("Failed to serialize response: {e}")))?;
    body.push(b'\n');

    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "application/json")
        .header(CACHE_CONTROL, CachePolicy::Private.header_value())
        .body(full(body))
        .map_err(|e| GatewayError::InternalError(format!("Failed to build response: {e}")))
}

/// Adds the paging headers of `/v2/list` to a JSON response.
pub fn with_link_header(
    mut response: Response<GatewayBody>,
    link: Option<String>,
) -> Result<Response<GatewayBody>> {
    let headers = response.headers_mut();
    if let Some(link) = link {
        let value = HeaderValue::try_from(link)
            .map_err(|e| GatewayError::InternalError(format!("Invalid Link header: {e}")))?;
        headers.insert(LINK, value);
    }
    headers.insert(
        ACCESS_CONTROL_EXPOSE_HEADERS,
        HeaderValue::from_static("Link"),
    );
    Ok(response)
}

/// A 302 to `location`. Pass no policy for local redirects, which carry no Cache-Control.
pub fn redirect(location: &str, policy: Option<CachePolicy>) -> Result<Response<GatewayBody>> {
    let mut builder = Response::builder()
        .status(StatusCode::FOUND)
        .header(LOCATION, location);
    if let Some(policy) = policy {
        builder = builder.header(CACHE_CONTROL, policy.header_value());
    }

    builder
        .body(full(Bytes::new()))
        .map_err(|e| GatewayError::InternalError(format!("Failed to build response: {e}")))
}

/// Plain-text error response. Only the public message reaches the client.
pub fn error_response(err: &GatewayError) -> Response<GatewayBody> {
    let mut response = Response::new(full(format!("{}\n", err.public_message())));
    *response.status_mut() = err.status();

    let headers = response.headers_mut();
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    headers.insert(CACHE_CONTROL, CachePolicy::Private.header_value());
    response
}
