//! Conversion of raw path and query strings into bounded image parameters.
use crate::errors::{GatewayError, Result};

pub const DEFAULT_BLUR: u8 = 5;
pub const MIN_BLUR: u8 = 1;
pub const MAX_BLUR: u8 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Webp,
}

impl ImageFormat {
    /// File extension used in canonical paths, including the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => ".jpg",
            ImageFormat::Webp => ".webp",
        }
    }
}

/// Width and height as requested. Zero stands for the image's own dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestedSize {
    pub width: u64,
    pub height: u64,
}

impl RequestedSize {
    /// Resolves zero dimensions against the image and enforces `max`. A dimension
    /// equal to the image's natural one is always allowed.
    pub fn resolve(&self, natural_width: u32, natural_height: u32, max: u32) -> Result<(u32, u32)> {
        Ok((
            resolve_dimension(self.width, natural_width, max)?,
            resolve_dimension(self.height, natural_height, max)?,
        ))
    }
}

fn resolve_dimension(requested: u64, natural: u32, max: u32) -> Result<u32> {
    if requested == 0 || requested == u64::from(natural) {
        return Ok(natural);
    }
    if requested > u64::from(max) {
        return Err(GatewayError::InvalidSize);
    }
    u32::try_from(requested).map_err(|_| GatewayError::InvalidSize)
}

/// Parses a width or height. Only plain decimal digits within the signed
/// 64-bit range are accepted.
pub fn parse_size(raw: &str) -> Result<u64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(GatewayError::InvalidSize);
    }
    let value: i64 = raw.parse().map_err(|_| GatewayError::InvalidSize)?;
    u64::try_from(value).map_err(|_| GatewayError::InvalidSize)
}

/// Parses the `blur` query value. `None` means the key was absent; an empty
/// value selects the default amount.
pub fn parse_blur(raw: Option<&str>) -> Result<Option<u8>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    if raw.is_empty() {
        return Ok(Some(DEFAULT_BLUR));
    }

    let amount: i64 = raw.parse().map_err(|_| GatewayError::InvalidBlurAmount)?;
    if !(i64::from(MIN_BLUR)..=i64::from(MAX_BLUR)).contains(&amount) {
        return Err(GatewayError::InvalidBlurAmount);
    }
    Ok(Some(amount as u8))
}

/// Parses the extension captured after the size, including its leading dot.
pub fn parse_extension(raw: &str) -> Result<ImageFormat> {
    match raw {
        "" | ".jpg" => Ok(ImageFormat::Jpeg),
        ".webp" => Ok(ImageFormat::Webp),
        _ => Err(GatewayError::InvalidFileExtension),
    }
}
