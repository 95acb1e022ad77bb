//! Base64 and data-URL helpers for inline image responses

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::{AppError, Result};

/// Encode binary data to a base64 string
pub fn encode(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decode a base64 string, accepting plain base64 or a full data URL
pub fn decode(encoded: &str) -> Result<Vec<u8>> {
    let data = encoded.rsplit(',').next().unwrap_or(encoded);

    STANDARD
        .decode(data.trim())
        .map_err(|e| AppError::InvalidRequest(format!("Invalid base64 data: {e}")))
}

/// Create an image data URL from binary data
pub fn data_url(data: &[u8], format: &str) -> String {
    format!("data:image/{};base64,{}", format, encode(data))
}

/// The image format named by a data URL prefix, if present
pub fn format_from_data_url(url: &str) -> Option<&str> {
    let rest = url.strip_prefix("data:image/")?;
    let end = rest.find(';')?;
    Some(&rest[..end])
}

/// Turn model output into a data URL: pass data URLs through, wrap bare
/// base64 with the given media type.
pub fn ensure_data_url(payload: &str, media_type: Option<&str>) -> String {
    if payload.starts_with("data:") {
        return payload.to_string();
    }
    let media_type = media_type.unwrap_or("image/png");
    format!("data:{media_type};base64,{payload}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_round_trip() {
        let original = b"Hello, World!";
        let decoded = decode(&encode(original)).unwrap();
        assert_eq!(original.as_slice(), decoded.as_slice());
    }

    #[test]
    fn test_decode_accepts_data_url() {
        let decoded = decode("data:image/png;base64,SGVsbG8sIFdvcmxkIQ==").unwrap();
        assert_eq!(b"Hello, World!", decoded.as_slice());
    }

    #[test]
    fn test_data_url_prefix_and_format() {
        let url = data_url(b"bytes", "jpeg");
        assert!(url.starts_with("data:image/jpeg;base64,"));
        assert_eq!(format_from_data_url(&url), Some("jpeg"));
        assert_eq!(format_from_data_url("not a data url"), None);
    }

    #[test]
    fn test_ensure_data_url_passthrough_and_wrap() {
        let already = "data:image/webp;base64,abc";
        assert_eq!(ensure_data_url(already, None), already);

        assert_eq!(
            ensure_data_url("abc", Some("image/jpeg")),
            "data:image/jpeg;base64,abc"
        );
        assert_eq!(ensure_data_url("abc", None), "data:image/png;base64,abc");
    }
}
