use crate::canonical::CanonicalTarget;
use crate::errors::{GatewayError, Result};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use url::Url;

type HmacSha256 = Hmac<Sha256>;

/// Signs canonical requests so the image renderer can verify they came from us.
#[derive(Clone)]
pub struct Signer {
    mac: HmacSha256,
}

impl Signer {
    pub fn new(key: &[u8]) -> Result<Self> {
        let mac = HmacSha256::new_from_slice(key)
            .map_err(|e| GatewayError::InternalError(format!("Invalid HMAC key: {e}")))?;
        Ok(Signer { mac })
    }

    /// HMAC-SHA256 of `message`, as lowercase hex.
    pub fn sign(&self, message: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(message.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Absolute renderer URL for `target`, with the signature as the last
    /// query parameter.
    pub fn signed_location(&self, image_service_url: &Url, target: &CanonicalTarget) -> String {
        let canonical = target.to_string();
        let signature = self.sign(&canonical);
        let separator = if canonical.contains('?') { '&' } else { '?' };

        format!(
            "{}{canonical}{separator}hmac={signature}",
            image_service_url.as_str().trim_end_matches('/')
        )
    }
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Signer(<redacted>)")
    }
}
