//! Upload rules: target folders, accepted image types and media URLs.

use validator::{ValidateUrl, ValidationError};

use crate::error::CoreError;

pub const FOLDER_BLOG: &str = "blog";
pub const FOLDER_GALLERY: &str = "gallery";
pub const FOLDER_REVIEWS: &str = "reviews";

/// Folders an upload may be stored under.
pub const VALID_FOLDERS: &[&str] = &[FOLDER_BLOG, FOLDER_GALLERY, FOLDER_REVIEWS];

/// Default maximum upload size (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Public URL prefix under which locally stored files are served.
pub const LOCAL_URL_PREFIX: &str = "/uploads/";

pub fn validate_folder(folder: &str) -> Result<(), CoreError> {
    if VALID_FOLDERS.contains(&folder) {
        Ok(())
    } else {
        Err(CoreError::field(
            "folder",
            format!(
                "invalid folder '{folder}', expected one of: {}",
                VALID_FOLDERS.join(", ")
            ),
        ))
    }
}

/// Image formats accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
    Gif,
    Webp,
}

impl ImageKind {
    pub fn mime(self) -> &'static str {
        match self {
            ImageKind::Jpeg => "image/jpeg",
            ImageKind::Png => "image/png",
            ImageKind::Gif => "image/gif",
            ImageKind::Webp => "image/webp",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ImageKind::Jpeg => "jpg",
            ImageKind::Png => "png",
            ImageKind::Gif => "gif",
            ImageKind::Webp => "webp",
        }
    }
}

/// Sniff the image type from the leading bytes. The client-declared content
/// type and file name are not trusted.
pub fn detect_image(bytes: &[u8]) -> Option<ImageKind> {
    let kind = infer::get(bytes)?;
    match kind.mime_type() {
        "image/jpeg" => Some(ImageKind::Jpeg),
        "image/png" => Some(ImageKind::Png),
        "image/gif" => Some(ImageKind::Gif),
        "image/webp" => Some(ImageKind::Webp),
        _ => None,
    }
}

/// A media URL is either an absolute http(s) URL or a path to a locally
/// stored upload.
pub fn is_valid_media_url(value: &str) -> bool {
    if let Some(rest) = value.strip_prefix(LOCAL_URL_PREFIX) {
        return !rest.is_empty() && !rest.contains("..") && !rest.contains(char::is_whitespace);
    }
    (value.starts_with("http://") || value.starts_with("https://")) && value.validate_url()
}

/// `validator` adapter for [`is_valid_media_url`].
pub fn validate_media_url_field(value: &str) -> Result<(), ValidationError> {
    if is_valid_media_url(value) {
        Ok(())
    } else {
        let mut err = ValidationError::new("url");
        err.message = Some("must be a valid URL".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folder_allow_list() {
        assert!(validate_folder("gallery").is_ok());
        assert!(validate_folder("blog").is_ok());
        assert!(validate_folder("reviews").is_ok());
        assert!(validate_folder("../etc").is_err());
        assert!(validate_folder("avatars").is_err());
    }

    #[test]
    fn detects_image_signatures() {
        assert_eq!(detect_image(&[0xFF, 0xD8, 0xFF, 0xE0]), Some(ImageKind::Jpeg));
        assert_eq!(
            detect_image(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0]),
            Some(ImageKind::Png)
        );
        assert_eq!(detect_image(b"GIF89a"), Some(ImageKind::Gif));
        assert_eq!(detect_image(b"RIFF\0\0\0\0WEBPVP8 "), Some(ImageKind::Webp));
        assert_eq!(detect_image(b"%PDF-1.7"), None);
        assert_eq!(detect_image(&[]), None);
    }

    #[test]
    fn rejects_other_recognised_formats() {
        // BMP and TIFF are images, but not ones we serve.
        assert_eq!(detect_image(b"BM\0\0\0\0\0\0\0\0"), None);
        assert_eq!(detect_image(&[0x49, 0x49, 0x2A, 0x00, 0x08, 0, 0, 0]), None);
        assert_eq!(detect_image(b"PK\x03\x04rest-of-zip"), None);
    }

    #[test]
    fn media_urls() {
        assert!(is_valid_media_url("https://i.postimg.cc/abc/photo.jpg"));
        assert!(is_valid_media_url("/uploads/gallery/1.jpg"));
        assert!(!is_valid_media_url("/uploads/"));
        assert!(!is_valid_media_url("/uploads/../secret"));
        assert!(!is_valid_media_url("ftp://example.com/a.jpg"));
        assert!(!is_valid_media_url("not a url"));
        assert!(!is_valid_media_url("javascript:alert(1)"));
    }
}
