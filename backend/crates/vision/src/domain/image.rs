//! Image Source

use base64::Engine;
use base64::engine::general_purpose;

use crate::error::{VisionError, VisionResult};

/// MIME type assumed for bare base64 payloads
pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

/// Turn the client's `image` field into a URL the model accepts
///
/// `data:` and `http(s)://` URLs pass through untouched. Anything else must
/// be standard base64 and is wrapped as a JPEG data URL.
pub fn normalize_image(raw: &str) -> VisionResult<String> {
    let image = raw.trim();
    if image.is_empty() {
        return Err(VisionError::MissingImage);
    }

    if image.starts_with("data:") || image.starts_with("http://") || image.starts_with("https://")
    {
        return Ok(image.to_string());
    }

    general_purpose::STANDARD
        .decode(image)
        .map_err(|_| VisionError::MalformedInput("image is not valid base64".to_string()))?;

    Ok(format!("data:{};base64,{}", DEFAULT_IMAGE_MIME, image))
}
