use crate::cache_policy::{CachePolicy, trailing_slash_redirect};
use crate::canonical::CanonicalRequest;
use crate::config::{Config, ListConfig};
use crate::errors::{GatewayError, Result};
use crate::listing::{DeprecatedImage, ListImage, Pagination};
use crate::metrics_defs::{PROVIDER_ERRORS, REDIRECTS_ISSUED, REQUEST_DURATION, REQUESTS_INFLIGHT};
use crate::response::{self, GatewayBody};
use crate::routes::{Endpoint, Matcher, QueryParams, RawImageRequest};
use crate::selector::Selector;
use crate::signer::Signer;
use catalog::ImageProvider;
use http::Uri;
use hyper::service::Service;
use hyper::{Request, Response};
use shared::{counter, gauge, histogram};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// Holds one unit of `requests.inflight` until dropped, including when the
/// connection goes away mid-request.
struct InflightGuard;

impl InflightGuard {
    fn new() -> Self {
        gauge!(REQUESTS_INFLIGHT).increment(1.0);
        InflightGuard
    }
}

impl Drop for InflightGuard {
    fn drop(&mut self) {
        gauge!(REQUESTS_INFLIGHT).decrement(1.0);
    }
}

/// Turns request URIs into signed redirects or catalog JSON.
pub struct Gateway {
    provider: Arc<dyn ImageProvider>,
    matcher: Matcher,
    signer: Signer,
    root_url: Url,
    image_service_url: Url,
    max_image_size: u32,
    list: ListConfig,
    handler_timeout: Duration,
}

impl Gateway {
    pub fn new(config: &Config, provider: Arc<dyn ImageProvider>) -> Result<Self> {
        Ok(Gateway {
            provider,
            matcher: Matcher::new(),
            signer: Signer::new(config.hmac_key.as_bytes())?,
            root_url: config.root_url.clone(),
            image_service_url: config.image_service_url.clone(),
            max_image_size: config.max_image_size,
            list: config.list,
            handler_timeout: config.timeouts.handler(),
        })
    }

    /// Produces the response for `uri`. Failures are rendered as plain-text
    /// error responses, so this never fails itself.
    pub async fn handle(&self, uri: &Uri) -> Response<GatewayBody> {
        let start = Instant::now();
        let _inflight = InflightGuard::new();

        let path = uri.path();
        let dispatch = self.dispatch(path, uri.query());
        let result = tokio::time::timeout(self.handler_timeout, dispatch)
            .await
            .unwrap_or(Err(GatewayError::HandlerTimeout));

        let response = match result {
            Ok(response) => response,
            Err(err) => {
                if err.status().is_server_error() {
                    tracing::error!(error = %err, path, "Request failed");
                } else {
                    tracing::debug!(error = %err, path, "Rejected request");
                }
                if matches!(err, GatewayError::Provider(_)) {
                    counter!(PROVIDER_ERRORS).increment(1);
                }
                response::error_response(&err)
            }
        };

        histogram!(REQUEST_DURATION, "status" => response.status().as_u16().to_string())
            .record(start.elapsed().as_secs_f64());
        response
    }

    async fn dispatch(&self, path: &str, query: Option<&str>) -> Result<Response<GatewayBody>> {
        if let Some(location) = trailing_slash_redirect(path, query) {
            return response::redirect(&location, None);
        }

        let query = QueryParams::parse(query);
        match self.matcher.resolve(path, &query)? {
            Endpoint::List => self.list(&query).await,
            Endpoint::DeprecatedList => self.deprecated_list().await,
            Endpoint::Info(selector) => self.info(&selector).await,
            Endpoint::Image(raw) => self.image(raw).await,
        }
    }

    async fn image(&self, raw: RawImageRequest) -> Result<Response<GatewayBody>> {
        // Validated before the catalog is consulted
        let request = CanonicalRequest::try_from(raw)?;
        let image = request.selector.resolve(self.provider.as_ref()).await?;
        let target = request.target(&image, self.max_image_size)?;

        let location = self
            .signer
            .signed_location(&self.image_service_url, &target);
        counter!(REDIRECTS_ISSUED, "selector" => request.selector.kind()).increment(1);
        tracing::debug!(%target, selector = request.selector.kind(), "Redirecting");

        response::redirect(
            &location,
            Some(CachePolicy::for_selector(&request.selector)),
        )
    }

    async fn list(&self, query: &QueryParams) -> Result<Response<GatewayBody>> {
        let pagination = Pagination::from_query(query, &self.list);
        let listing = self
            .provider
            .list(pagination.offset(), pagination.limit)
            .await?;

        let link = pagination.link_header(&self.root_url, listing.total);
        let images: Vec<ListImage> = listing
            .images
            .into_iter()
            .map(|image| ListImage::new(image, &self.root_url))
            .collect();

        response::with_link_header(response::json_response(&images)?, link)
    }

    async fn deprecated_list(&self) -> Result<Response<GatewayBody>> {
        let images = self
            .provider
            .list_all()
            .await?
            .into_iter()
            .map(DeprecatedImage::try_from)
            .collect::<Result<Vec<_>>>()?;

        response::json_response(&images)
    }

    async fn info(&self, selector: &Selector) -> Result<Response<GatewayBody>> {
        let image = selector.resolve(self.provider.as_ref()).await?;
        response::json_response(&ListImage::new(image, &self.root_url))
    }
}

/// hyper adapter around a shared [`Gateway`]. Request bodies are ignored.
#[derive(Clone)]
pub struct GatewayService {
    gateway: Arc<Gateway>,
}

impl GatewayService {
    pub fn new(gateway: Gateway) -> Self {
        GatewayService {
            gateway: Arc::new(gateway),
        }
    }
}

impl<B> Service<Request<B>> for GatewayService
where
    B: Send + 'static,
{
    type Response = Response<GatewayBody>;
    type Error = GatewayError;
    type Future = Pin<
        Box<dyn Future<Output = std::result::Result<Self::Response, Self::Error>> + Send + 'static>,
    >;

    fn call(&self, req: Request<B>) -> Self::Future {
        let gateway = self.gateway.clone();
        Box::pin(async move { Ok(gateway.handle(req.uri()).await) })
    }
}
