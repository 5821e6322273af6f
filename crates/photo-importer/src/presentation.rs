//! Encoding of image bytes for the presentation layer.

use base64::Engine;

pub const JPEG_DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";

/// Standard base64 with padding, behind the JPEG data URI prefix.
pub fn to_data_uri(bytes: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("{}{}", JPEG_DATA_URI_PREFIX, encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_uri() {
        assert_eq!(to_data_uri(b"jpg"), "data:image/jpeg;base64,anBn");
        assert_eq!(to_data_uri(b""), JPEG_DATA_URI_PREFIX);
    }
}
