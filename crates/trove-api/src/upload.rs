//! Image upload constraints: jpeg/jpg/png/gif only, at most 5 MB.

use crate::error::ApiError;

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

const ALLOWED_EXTENSIONS: [&str; 4] = ["jpeg", "jpg", "png", "gif"];
const ALLOWED_MIME_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/gif"];

/// Check filename extension, declared content type, and size. Returns
/// the lowercased extension (without the dot) on success.
pub fn validate_image(
    filename: &str,
    content_type: Option<&str>,
    size: usize,
) -> Result<String, ApiError> {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
        .ok_or_else(|| ApiError::Upload("only images are allowed (jpeg, jpg, png, gif)".into()))?;

    if let Some(mime) = content_type {
        if !ALLOWED_MIME_TYPES.contains(&mime) {
            return Err(ApiError::Upload(
                "only images are allowed (jpeg, jpg, png, gif)".into(),
            ));
        }
    }

    if size > MAX_IMAGE_BYTES {
        return Err(ApiError::Upload("image exceeds the 5 MB size limit".into()));
    }

    Ok(ext)
}

/// Unique storage filename: millisecond timestamp plus the original
/// extension.
pub fn storage_filename(ext: &str) -> String {
    format!("{}.{ext}", chrono::Utc::now().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_allowed_types() {
        for name in ["photo.jpg", "photo.JPEG", "scan.png", "anim.gif"] {
            assert!(validate_image(name, None, 1024).is_ok(), "{name}");
        }
        let ext = validate_image("photo.JPG", Some("image/jpeg"), 1024).unwrap();
        assert_eq!(ext, "jpg");
    }

    #[test]
    fn rejects_disallowed_extension_and_mime() {
        assert!(validate_image("malware.exe", None, 10).is_err());
        assert!(validate_image("noextension", None, 10).is_err());
        assert!(validate_image("photo.png", Some("application/pdf"), 10).is_err());
    }

    #[test]
    fn rejects_oversized_images() {
        assert!(validate_image("big.png", None, MAX_IMAGE_BYTES + 1).is_err());
        assert!(validate_image("fits.png", None, MAX_IMAGE_BYTES).is_ok());
    }
}
