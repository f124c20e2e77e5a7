//! Listing image upload rules.
//!
//! An upload is accepted only when its declared content type indicates an
//! image and its size is at most [`MAX_IMAGE_BYTES`]. Accepted files are
//! stored under a key derived from the uploader and the upload instant.

use crate::error::CoreError;
use crate::types::DbId;

/// Maximum accepted image size: 5 MiB.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Validate an upload's declared content type and size.
///
/// Rejection carries a user-facing message; callers must leave stored
/// image state untouched on `Err`.
pub fn validate_image(declared_type: &str, size_bytes: usize) -> Result<(), CoreError> {
    if !declared_type.starts_with("image/") {
        return Err(CoreError::Validation(format!(
            "file must be an image (got content type '{declared_type}')"
        )));
    }
    if size_bytes > MAX_IMAGE_BYTES {
        return Err(CoreError::Validation(
            "image must be 5MB or smaller".to_string(),
        ));
    }
    Ok(())
}

/// Build the storage key for an accepted upload:
/// `<owner id>/<millis timestamp>-<sanitized filename>`.
pub fn storage_key(owner_id: DbId, timestamp_millis: i64, filename: &str) -> String {
    format!(
        "{owner_id}/{timestamp_millis}-{}",
        sanitize_filename(filename)
    )
}

/// Reduce a client-supplied filename to a safe key segment.
///
/// Strips any path components, then maps everything outside
/// `[A-Za-z0-9._-]` to `_`. An empty result falls back to `upload`.
fn sanitize_filename(filename: &str) -> String {
    let basename = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);
    let cleaned: String = basename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let trimmed = cleaned.trim_matches('.');
    if trimmed.is_empty() {
        "upload".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_image_at_size_limit() {
        assert!(validate_image("image/png", MAX_IMAGE_BYTES).is_ok());
        assert!(validate_image("image/jpeg", 1024).is_ok());
    }

    #[test]
    fn test_rejects_oversized_image() {
        let err = validate_image("image/png", MAX_IMAGE_BYTES + 1);
        assert!(err.is_err());
    }

    #[test]
    fn test_rejects_non_image_content_type() {
        assert!(validate_image("application/pdf", 100).is_err());
        assert!(validate_image("text/plain", 100).is_err());
        // Prefix must be the type, not a substring.
        assert!(validate_image("text/image", 100).is_err());
    }

    #[test]
    fn test_storage_key_layout() {
        let key = storage_key(7, 1700000000000, "cover.png");
        assert_eq!(key, "7/1700000000000-cover.png");
    }

    #[test]
    fn test_filename_is_sanitized() {
        let key = storage_key(7, 1, "../../etc/passwd");
        assert_eq!(key, "7/1-passwd");

        let key = storage_key(7, 1, "my book photo (1).jpg");
        assert_eq!(key, "7/1-my_book_photo__1_.jpg");

        let key = storage_key(7, 1, "...");
        assert_eq!(key, "7/1-upload");
    }
}
