//! Canonical form of an image request, as understood by the image renderer.
use crate::errors::Result;
use crate::params::{self, ImageFormat, RequestedSize};
use crate::routes::RawImageRequest;
use crate::selector::Selector;
use catalog::Image;
use std::fmt;

/// A validated image request that still has to be resolved against the catalog.
#[derive(Clone, Debug, PartialEq)]
pub struct CanonicalRequest {
    pub selector: Selector,
    pub size: RequestedSize,
    pub format: ImageFormat,
    pub blur: Option<u8>,
    pub grayscale: bool,
}

impl TryFrom<RawImageRequest> for CanonicalRequest {
    type Error = crate::errors::GatewayError;

    /// Validation runs size first, then blur, then the extension, so the first
    /// failing check decides the error.
    fn try_from(raw: RawImageRequest) -> Result<Self> {
        let size = RequestedSize {
            width: params::parse_size(&raw.width)?,
            height: params::parse_size(&raw.height)?,
        };
        let blur = params::parse_blur(raw.blur.as_deref())?;
        let format = params::parse_extension(&raw.extension)?;

        Ok(CanonicalRequest {
            selector: raw.selector,
            size,
            format,
            blur,
            grayscale: raw.grayscale,
        })
    }
}

impl CanonicalRequest {
    /// Binds the request to a concrete image, checking the size against it.
    pub fn target(&self, image: &Image, max_image_size: u32) -> Result<CanonicalTarget> {
        let (width, height) = self
            .size
            .resolve(image.width, image.height, max_image_size)?;
        Ok(CanonicalTarget {
            id: image.id.clone(),
            width,
            height,
            format: self.format,
            blur: self.blur,
            grayscale: self.grayscale,
        })
    }
}

/// A fully resolved rendering request. Its `Display` form is the message that
/// gets signed.
#[derive(Clone, Debug, PartialEq)]
pub struct CanonicalTarget {
    pub id: String,
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
    pub blur: Option<u8>,
    pub grayscale: bool,
}

impl CanonicalTarget {
    pub fn path(&self) -> String {
        format!(
            "/id/{}/{}/{}{}",
            self.id,
            self.width,
            self.height,
            self.format.extension()
        )
    }

    /// Query string without the leading `?`. Empty when there are no options.
    pub fn query(&self) -> String {
        let mut parts = Vec::with_capacity(2);
        if let Some(blur) = self.blur {
            parts.push(format!("blur={blur}"));
        }
        if self.grayscale {
            parts.push("grayscale".to_string());
        }
        parts.join("&")
    }
}

impl fmt::Display for CanonicalTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())?;
        let query = self.query();
        if !query.is_empty() {
            write!(f, "?{query}")?;
        }
        Ok(())
    }
}
