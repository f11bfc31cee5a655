use crate::config::ValidationError;
use catalog::ProviderError;
use hyper::StatusCode;
use thiserror::Error;

/// Result type alias for gateway operations
pub type Result<T, E = GatewayError> = std::result::Result<T, E>;

/// Errors that can occur while serving a request or starting the gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Invalid size")]
    InvalidSize,

    #[error("Invalid blur amount")]
    InvalidBlurAmount,

    #[error("Invalid file extension")]
    InvalidFileExtension,

    #[error("Image does not exist")]
    ImageNotFound,

    #[error("page not found")]
    RouteNotFound,

    #[error("Provider error: {0}")]
    Provider(ProviderError),

    #[error("Request handling exceeded the deadline")]
    HandlerTimeout,

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ValidationError),
}

impl From<ProviderError> for GatewayError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NotFound => GatewayError::ImageNotFound,
            other => GatewayError::Provider(other),
        }
    }
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::InvalidSize
            | GatewayError::InvalidBlurAmount
            | GatewayError::InvalidFileExtension => StatusCode::BAD_REQUEST,
            GatewayError::ImageNotFound | GatewayError::RouteNotFound => StatusCode::NOT_FOUND,
            GatewayError::HandlerTimeout => StatusCode::SERVICE_UNAVAILABLE,
            GatewayError::Provider(_)
            | GatewayError::InternalError(_)
            | GatewayError::Io(_)
            | GatewayError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message sent to clients. Server-side failures never expose their detail.
    pub fn public_message(&self) -> &'static str {
        match self {
            GatewayError::InvalidSize => "Invalid size",
            GatewayError::InvalidBlurAmount => "Invalid blur amount",
            GatewayError::InvalidFileExtension => "Invalid file extension",
            GatewayError::ImageNotFound => "Image does not exist",
            GatewayError::RouteNotFound => "page not found",
            _ => "Something went wrong",
        }
    }
}
