//! Base64 image data URIs

use tracing::debug;

use super::format::decode_base64;
use super::{expect_str, Predicate, PredicateResult};
use crate::error::PredicateError;
use crate::value::Value;

const DATA_IMAGE_PREFIX: &str = "data:image/";

/// Image formats accepted by [`IsBase64Image`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
    Gif,
    Bmp,
    Webp,
}

impl ImageKind {
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageKind::Jpeg => "image/jpeg",
            ImageKind::Png => "image/png",
            ImageKind::Gif => "image/gif",
            ImageKind::Bmp => "image/bmp",
            ImageKind::Webp => "image/webp",
        }
    }
}

/// Identify an image by its leading signature bytes
pub fn sniff_image(bytes: &[u8]) -> Option<ImageKind> {
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some(ImageKind::Jpeg)
    } else if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some(ImageKind::Png)
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some(ImageKind::Gif)
    } else if bytes.starts_with(b"BM") {
        Some(ImageKind::Bmp)
    } else if bytes.len() >= 14 && bytes.starts_with(b"RIFF") && &bytes[8..14] == b"WEBPVP" {
        Some(ImageKind::Webp)
    } else {
        None
    }
}

/// A `data:image/...;base64,` URI whose payload decodes to a known image.
///
/// The declared media type is not compared with the sniffed one; only the
/// decoded bytes decide.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsBase64Image;

impl Predicate for IsBase64Image {
    fn check(&self, value: &Value) -> PredicateResult {
        let s = expect_str(value)?;
        if !s.starts_with(DATA_IMAGE_PREFIX) {
            return Err(PredicateError::new(
                "invalid base64 image format: must start with 'data:image/'",
            ));
        }
        let Some((_, payload)) = s.split_once(',') else {
            return Err(PredicateError::new(
                "invalid base64 image format: missing data prefix",
            ));
        };
        let decoded = decode_base64(payload)
            .map_err(|_| PredicateError::new("value is not valid Base64 image"))?;
        debug!(decoded_len = decoded.len(), "Decoded base64 image payload");

        match sniff_image(&decoded) {
            Some(_) => Ok(()),
            None => Err(PredicateError::new("invalid image format")),
        }
    }
}
