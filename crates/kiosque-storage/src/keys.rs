//! Storage key generation.
//!
//! Keys are collision-resistant and generated server-side: `uploads/{uuid}.{ext}`
//! for accepted files, `quarantine/{uuid}` for suspect ones. The extension
//! comes from the detected MIME type, never from the declared filename.

use uuid::Uuid;

/// Key prefix for accepted uploads.
pub const UPLOAD_PREFIX: &str = "uploads";

/// Key prefix for the isolated quarantine area. Never listed or resolved by
/// the normal file read path.
pub const QUARANTINE_PREFIX: &str = "quarantine";

/// Map a verified MIME type to the extension used in storage keys.
pub fn extension_for_mime(mime: &str) -> &'static str {
    match mime {
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/webp" => "webp",
        "image/gif" => "gif",
        _ => "bin",
    }
}

/// Generate a fresh storage key for an accepted upload.
pub fn generate_upload_key(detected_mime: &str) -> String {
    format!(
        "{}/{}.{}",
        UPLOAD_PREFIX,
        Uuid::new_v4(),
        extension_for_mime(detected_mime)
    )
}

/// Generate a fresh storage key inside the quarantine area.
pub fn generate_quarantine_key() -> String {
    format!("{}/{}", QUARANTINE_PREFIX, Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_keys_are_unique_and_prefixed() {
        let a = generate_upload_key("image/jpeg");
        let b = generate_upload_key("image/jpeg");
        assert_ne!(a, b);
        assert!(a.starts_with("uploads/"));
        assert!(a.ends_with(".jpg"));
    }

    #[test]
    fn test_quarantine_keys_live_in_isolated_prefix() {
        let key = generate_quarantine_key();
        assert!(key.starts_with("quarantine/"));
        assert!(!key.starts_with("uploads/"));
    }

    #[test]
    fn test_extension_mapping() {
        assert_eq!(extension_for_mime("image/png"), "png");
        assert_eq!(extension_for_mime("image/webp"), "webp");
        assert_eq!(extension_for_mime("image/gif"), "gif");
        assert_eq!(extension_for_mime("application/octet-stream"), "bin");
    }
}
