//! Generated image types.

use serde::{Deserialize, Serialize};

/// A generated image payload.
///
/// Transient: callers persist the bytes to object storage immediately and
/// keep only the resulting URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct GeneratedImage {
    /// Binary image data
    pub data: Vec<u8>,
    /// MIME type of the image, e.g. "image/png"
    pub mime_type: String,
}

/// Supported generation sizes.
///
/// The wire form is the provider-facing size string.
///
/// # Examples
///
/// ```
/// use fabula_core::ImageSize;
///
/// assert_eq!(ImageSize::Square1024.wire_format(), "1024x1024");
/// assert_eq!(format!("{}", ImageSize::Square512), "512x512");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum ImageSize {
    /// 512x512 pixels
    #[serde(rename = "512x512")]
    #[display("512x512")]
    Square512,
    /// 768x768 pixels
    #[serde(rename = "768x768")]
    #[display("768x768")]
    Square768,
    /// 1024x1024 pixels
    #[serde(rename = "1024x1024")]
    #[display("1024x1024")]
    Square1024,
}

impl ImageSize {
    /// The provider-facing size string.
    pub fn wire_format(&self) -> &'static str {
        match self {
            ImageSize::Square512 => "512x512",
            ImageSize::Square768 => "768x768",
            ImageSize::Square1024 => "1024x1024",
        }
    }
}

impl Default for ImageSize {
    fn default() -> Self {
        ImageSize::Square1024
    }
}
